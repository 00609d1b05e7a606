//! Physical and empirical constants used by the pipeline.

use crate::error::{ModelError, ModelResult};
use pj_core::units::constants::STANDARD_GRAVITY;
use serde::{Deserialize, Serialize};

/// Named constants, fixed for the lifetime of a model.
///
/// Any subset may be overridden from configuration; omitted fields keep
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConstants {
    /// Specific gas constant of air [J/(kg K)]
    pub gas_constant: f64,
    /// Heat capacity ratio
    pub gamma: f64,
    /// Gravitational acceleration [m/s^2]
    pub gravity: f64,
    /// Helmholtz end correction, multiples of opening diameter
    pub end_correction: f64,
    pub combustion_efficiency: f64,
    pub valve_discharge_coefficient: f64,
    pub exhaust_efficiency: f64,
    pub mixing_efficiency: f64,
    pub heat_transfer_factor: f64,

    /// Upper bound on valve open fraction
    pub max_duty_cycle: f64,
    /// Duty cycle = scale / frequency below the cap [Hz]
    pub duty_cycle_frequency_scale: f64,
    /// Duty cycle used when no frequency is available
    pub fallback_duty_cycle: f64,
    /// Flame temperature rise over ambient at stoichiometric [K]
    pub flame_temperature_rise: f64,
    /// Exhaust velocity cap as a fraction of flame-temperature sound speed
    pub subsonic_velocity_limit: f64,
    pub pressure_ratio_cap: f64,
    /// Exhaust velocity giving a unit pressure ratio [m/s]
    pub pressure_ratio_velocity_scale: f64,
    /// Propulsive power / jet power
    pub propulsive_efficiency: f64,
    /// Engine weight heuristic [kg per kW]
    pub weight_per_kilowatt: f64,
    /// Engine weight floor [kg]
    pub minimum_engine_weight: f64,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            gas_constant: 287.0,
            gamma: 1.4,
            gravity: STANDARD_GRAVITY,
            end_correction: 0.6,
            combustion_efficiency: 0.85,
            valve_discharge_coefficient: 0.8,
            exhaust_efficiency: 0.95,
            mixing_efficiency: 0.9,
            heat_transfer_factor: 0.85,
            max_duty_cycle: 0.4,
            duty_cycle_frequency_scale: 50.0,
            fallback_duty_cycle: 0.3,
            flame_temperature_rise: 2200.0,
            subsonic_velocity_limit: 0.8,
            pressure_ratio_cap: 1.2,
            pressure_ratio_velocity_scale: 300.0,
            propulsive_efficiency: 0.5,
            weight_per_kilowatt: 5.0,
            minimum_engine_weight: 10.0,
        }
    }
}

impl ModelConstants {
    /// Every constant must be finite and positive; end correction may be zero.
    pub fn validate(&self) -> ModelResult<()> {
        let positive = [
            ("gas_constant", self.gas_constant),
            ("gamma", self.gamma),
            ("gravity", self.gravity),
            ("combustion_efficiency", self.combustion_efficiency),
            ("valve_discharge_coefficient", self.valve_discharge_coefficient),
            ("exhaust_efficiency", self.exhaust_efficiency),
            ("mixing_efficiency", self.mixing_efficiency),
            ("heat_transfer_factor", self.heat_transfer_factor),
            ("max_duty_cycle", self.max_duty_cycle),
            ("duty_cycle_frequency_scale", self.duty_cycle_frequency_scale),
            ("fallback_duty_cycle", self.fallback_duty_cycle),
            ("flame_temperature_rise", self.flame_temperature_rise),
            ("subsonic_velocity_limit", self.subsonic_velocity_limit),
            ("pressure_ratio_cap", self.pressure_ratio_cap),
            ("pressure_ratio_velocity_scale", self.pressure_ratio_velocity_scale),
            ("propulsive_efficiency", self.propulsive_efficiency),
            ("weight_per_kilowatt", self.weight_per_kilowatt),
            ("minimum_engine_weight", self.minimum_engine_weight),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ModelError::InvalidConstant { name, value });
            }
        }
        if !self.end_correction.is_finite() || self.end_correction < 0.0 {
            return Err(ModelError::InvalidConstant {
                name: "end_correction",
                value: self.end_correction,
            });
        }
        Ok(())
    }
}
