//! Performance result aggregate.

use crate::constants::ModelConstants;
use crate::pipeline::PipelineTrace;
use pj_core::units::constants::{SECONDS_PER_HOUR, STANDARD_GRAVITY};
use serde::Serialize;
use std::fmt;

/// Whether the pipeline ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Complete,
    /// Pipeline failed; every metric is zeroed and SFC is infinite
    Failed,
}

/// Output of one model evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceResult {
    /// [L]
    pub combustion_volume: f64,
    /// [cm^2]
    pub intake_area: f64,
    /// [cm^2]
    pub exhaust_area: f64,
    /// [Hz]
    pub frequency: f64,
    /// [kg/s]
    pub air_mass_flow: f64,
    /// [kg/s]
    pub fuel_mass_flow: f64,
    /// [m/s]
    pub exhaust_velocity: f64,
    /// [N]
    pub thrust: f64,
    /// [s]
    pub specific_impulse: f64,
    /// Propulsive power [kW]
    pub power: f64,
    /// [%]
    pub thermal_efficiency: f64,
    /// [kg/(kW h)]
    pub specific_fuel_consumption: f64,
    pub thrust_to_weight_ratio: f64,
    /// [kW/kg]
    pub power_to_weight_ratio: f64,
    /// [kg/h]
    pub fuel_consumption_rate: f64,
    pub status: AnalysisStatus,
}

impl PerformanceResult {
    pub fn from_trace(trace: &PipelineTrace, c: &ModelConstants) -> Self {
        let thrust = trace.thrust.total;
        let power = trace.metrics.propulsive_power;
        let weight = (c.weight_per_kilowatt * power).max(c.minimum_engine_weight);

        Self {
            combustion_volume: trace.geometry.volume_liters,
            intake_area: trace.geometry.intake_area_cm2,
            exhaust_area: trace.geometry.exhaust_area_cm2,
            frequency: trace.frequency,
            air_mass_flow: trace.flows.air_mass_flow,
            fuel_mass_flow: trace.flows.fuel_mass_flow,
            exhaust_velocity: trace.exhaust.velocity,
            thrust,
            specific_impulse: trace.metrics.specific_impulse,
            power,
            thermal_efficiency: trace.metrics.thermal_efficiency,
            specific_fuel_consumption: trace.metrics.specific_fuel_consumption,
            thrust_to_weight_ratio: thrust / (weight * c.gravity),
            power_to_weight_ratio: power / weight,
            fuel_consumption_rate: trace.flows.fuel_mass_flow * SECONDS_PER_HOUR,
            status: AnalysisStatus::Complete,
        }
    }

    /// Stand-in for an evaluation that could not complete.
    pub fn failed() -> Self {
        Self {
            combustion_volume: 0.0,
            intake_area: 0.0,
            exhaust_area: 0.0,
            frequency: 0.0,
            air_mass_flow: 0.0,
            fuel_mass_flow: 0.0,
            exhaust_velocity: 0.0,
            thrust: 0.0,
            specific_impulse: 0.0,
            power: 0.0,
            thermal_efficiency: 0.0,
            specific_fuel_consumption: f64::INFINITY,
            thrust_to_weight_ratio: 0.0,
            power_to_weight_ratio: 0.0,
            fuel_consumption_rate: 0.0,
            status: AnalysisStatus::Failed,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == AnalysisStatus::Failed
    }
}

impl fmt::Display for PerformanceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pulse Jet Performance Summary")?;
        writeln!(f, "=============================")?;
        if self.is_failed() {
            writeln!(f, "  analysis could not complete")?;
            return Ok(());
        }
        writeln!(f)?;
        writeln!(f, "Thrust Performance:")?;
        writeln!(f, "  Thrust:              {:.1} N ({:.1} kgf)", self.thrust, self.thrust / STANDARD_GRAVITY)?;
        writeln!(f, "  Specific Impulse:    {:.0} s", self.specific_impulse)?;
        writeln!(f, "  Thrust-to-Weight:    {:.2}", self.thrust_to_weight_ratio)?;
        writeln!(f)?;
        writeln!(f, "Operating Characteristics:")?;
        writeln!(f, "  Frequency:           {:.0} Hz", self.frequency)?;
        writeln!(f, "  Air Mass Flow:       {:.3} kg/s", self.air_mass_flow)?;
        writeln!(f, "  Fuel Mass Flow:      {:.4} kg/s", self.fuel_mass_flow)?;
        writeln!(f, "  Exhaust Velocity:    {:.0} m/s", self.exhaust_velocity)?;
        writeln!(f)?;
        writeln!(f, "Efficiency Metrics:")?;
        writeln!(f, "  Thermal Efficiency:  {:.1} %", self.thermal_efficiency)?;
        writeln!(f, "  Power Output:        {:.1} kW", self.power)?;
        writeln!(f, "  Fuel Consumption:    {:.2} kg/h", self.fuel_consumption_rate)?;
        writeln!(
            f,
            "  Specific Fuel Cons.: {:.2} kg/(kW h)",
            self.specific_fuel_consumption
        )?;
        writeln!(f)?;
        writeln!(f, "Engine Geometry:")?;
        writeln!(f, "  Combustion Volume:   {:.2} L", self.combustion_volume)?;
        writeln!(f, "  Intake Area:         {:.1} cm²", self.intake_area)?;
        write!(f, "  Exhaust Area:        {:.1} cm²", self.exhaust_area)
    }
}
