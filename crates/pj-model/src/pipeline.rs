//! Seven-stage calculation pipeline.
//!
//! Each stage is a pure function of the design, the constants and the
//! outputs of earlier stages. Stages fail only when an intermediate value
//! stops being finite.

use crate::constants::ModelConstants;
use crate::error::{ModelError, ModelResult};
use pj_core::units::{self, readback};
use pj_core::{FuelProperties, GeometrySpec, OperatingSpec, ValveSpec, ensure_finite};
use serde::Serialize;
use std::f64::consts::PI;

fn finite(stage: &'static str, what: &'static str, v: f64) -> ModelResult<f64> {
    ensure_finite(v, what).map_err(ModelError::stage(stage))
}

/// Stage 1 output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeometryStage {
    pub volume_liters: f64,
    pub volume_m3: f64,
    pub intake_area_cm2: f64,
    pub exhaust_area_cm2: f64,
    pub exhaust_area_m2: f64,
    pub length_to_diameter: f64,
    pub area_ratio: f64,
    pub surface_area_m2: f64,
    pub volume_to_surface: f64,
}

pub fn derive_geometry(g: &GeometrySpec) -> ModelResult<GeometryStage> {
    const STAGE: &str = "geometry";
    Ok(GeometryStage {
        volume_liters: finite(STAGE, "chamber volume", g.chamber_volume_liters())?,
        volume_m3: finite(STAGE, "chamber volume", g.chamber_volume().value)?,
        intake_area_cm2: finite(STAGE, "intake area", g.intake_area_cm2())?,
        exhaust_area_cm2: finite(STAGE, "exhaust area", g.exhaust_area_cm2())?,
        exhaust_area_m2: finite(STAGE, "exhaust area", g.exhaust_area().value)?,
        length_to_diameter: finite(STAGE, "L/D ratio", g.length_to_diameter_ratio())?,
        area_ratio: finite(STAGE, "area ratio", g.area_ratio())?,
        surface_area_m2: finite(STAGE, "surface area", g.surface_area().value)?,
        volume_to_surface: finite(STAGE, "volume/surface ratio", g.volume_to_surface_ratio())?,
    })
}

/// Speed of sound in air [m/s] at an absolute temperature.
pub fn sound_speed(c: &ModelConstants, temperature_k: f64) -> f64 {
    (c.gamma * c.gas_constant * temperature_k).sqrt()
}

/// Stage 2: Helmholtz resonance estimate [Hz].
///
/// The exhaust pipe acts as the resonator neck. Returns 0 when the volume or
/// the neck length is non-positive.
pub fn helmholtz_frequency(
    g: &GeometrySpec,
    geo: &GeometryStage,
    op: &OperatingSpec,
    c: &ModelConstants,
) -> ModelResult<f64> {
    let a = sound_speed(c, op.ambient_kelvin());
    let neck_length = g.neck_length(c.end_correction).value;
    if geo.volume_m3 <= 0.0 || neck_length <= 0.0 {
        return Ok(0.0);
    }
    let f = a / (2.0 * PI) * (geo.exhaust_area_m2 / (geo.volume_m3 * neck_length)).sqrt();
    finite("frequency", "operating frequency", f)
}

/// Stage 3 output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MassFlowStage {
    /// [kg/m^3]
    pub air_density: f64,
    /// [m^2]
    pub effective_valve_area: f64,
    /// [m/s]
    pub characteristic_velocity: f64,
    pub duty_cycle: f64,
    /// [m^3/s]
    pub volumetric_flow: f64,
    /// [kg/s]
    pub air_mass_flow: f64,
    /// [kg/s]
    pub fuel_mass_flow: f64,
}

/// Valve open fraction, shrinking as the engine cycles faster.
pub fn duty_cycle(c: &ModelConstants, frequency: f64) -> f64 {
    if frequency > 0.0 {
        c.max_duty_cycle.min(c.duty_cycle_frequency_scale / frequency)
    } else {
        c.fallback_duty_cycle
    }
}

pub fn mass_flows(
    valves: &ValveSpec,
    op: &OperatingSpec,
    frequency: f64,
    c: &ModelConstants,
) -> ModelResult<MassFlowStage> {
    const STAGE: &str = "mass flow";
    let pressure = op.pressure().value;
    let air_density = finite(
        STAGE,
        "air density",
        pressure / (c.gas_constant * op.ambient_kelvin()),
    )?;
    let effective_valve_area = units::cm2(valves.valve_area()).value * c.valve_discharge_coefficient;
    let characteristic_velocity = finite(
        STAGE,
        "characteristic velocity",
        (2.0 * pressure / air_density).sqrt(),
    )?;
    let duty_cycle = duty_cycle(c, frequency);
    let volumetric_flow = effective_valve_area * characteristic_velocity * duty_cycle;
    let air_mass_flow = finite(
        STAGE,
        "air mass flow",
        air_density * volumetric_flow * c.mixing_efficiency,
    )?;
    let fuel_mass_flow = finite(STAGE, "fuel mass flow", air_mass_flow / op.air_fuel_ratio())?;

    Ok(MassFlowStage {
        air_density,
        effective_valve_area,
        characteristic_velocity,
        duty_cycle,
        volumetric_flow,
        air_mass_flow,
        fuel_mass_flow,
    })
}

/// Stage 4 output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CombustionStage {
    /// Chemical energy release rate [W]
    pub energy_release: f64,
    /// After combustion and heat-transfer losses [W]
    pub net_energy: f64,
    /// 1 at stoichiometric, falling off on either side
    pub mixture_factor: f64,
    /// [K]
    pub flame_temperature: f64,
    /// Air + fuel [kg/s]
    pub total_mass_flow: f64,
}

/// Ratio of equivalence ratio to its reciprocal, whichever is below one.
pub fn mixture_factor(stoich_ratio: f64, air_fuel_ratio: f64) -> f64 {
    let phi = stoich_ratio / air_fuel_ratio;
    phi.min(1.0 / phi)
}

pub fn combustion(
    op: &OperatingSpec,
    fuel: &FuelProperties,
    flows: &MassFlowStage,
    c: &ModelConstants,
) -> ModelResult<CombustionStage> {
    const STAGE: &str = "combustion";
    let heating_value = units::mj_per_kg(fuel.heating_value).value;
    let energy_release = finite(
        STAGE,
        "energy release",
        flows.fuel_mass_flow * heating_value,
    )?;
    let net_energy = energy_release * c.combustion_efficiency * c.heat_transfer_factor;
    let mixture_factor = finite(
        STAGE,
        "mixture factor",
        mixture_factor(fuel.stoich_ratio, op.air_fuel_ratio()),
    )?;
    // Coarse estimate: a fixed rise scaled by mixture quality, offset by ambient Celsius
    let flame_temperature = finite(
        STAGE,
        "flame temperature",
        c.flame_temperature_rise * mixture_factor + op.ambient_temp(),
    )?;

    Ok(CombustionStage {
        energy_release,
        net_energy,
        mixture_factor,
        flame_temperature,
        total_mass_flow: flows.air_mass_flow + flows.fuel_mass_flow,
    })
}

/// Stage 5 output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExhaustStage {
    /// [J/kg]
    pub specific_energy: f64,
    /// Unclamped nozzle velocity [m/s]
    pub ideal_velocity: f64,
    /// Subsonic cap at flame temperature [m/s]
    pub velocity_limit: f64,
    /// [m/s]
    pub velocity: f64,
}

impl ExhaustStage {
    pub fn is_clamped(&self) -> bool {
        self.ideal_velocity > self.velocity_limit
    }
}

pub fn exhaust_velocity(comb: &CombustionStage, c: &ModelConstants) -> ModelResult<ExhaustStage> {
    const STAGE: &str = "exhaust velocity";
    let specific_energy = if comb.total_mass_flow > 0.0 {
        comb.net_energy / comb.total_mass_flow
    } else {
        0.0
    };
    let specific_energy = finite(STAGE, "specific energy", specific_energy)?;
    let ideal_velocity = (2.0 * specific_energy * c.exhaust_efficiency).max(0.0).sqrt();
    let velocity_limit =
        c.subsonic_velocity_limit * sound_speed(c, comb.flame_temperature.max(0.0));
    let velocity = finite(STAGE, "exhaust velocity", ideal_velocity.min(velocity_limit))?;

    Ok(ExhaustStage {
        specific_energy,
        ideal_velocity,
        velocity_limit,
        velocity,
    })
}

/// Stage 6 output, all forces in newtons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThrustStage {
    pub momentum: f64,
    pub pressure_ratio: f64,
    /// [Pa]
    pub pressure_differential: f64,
    pub pressure: f64,
    /// Never negative
    pub total: f64,
}

pub fn thrust(
    op: &OperatingSpec,
    geo: &GeometryStage,
    comb: &CombustionStage,
    exhaust: &ExhaustStage,
    c: &ModelConstants,
) -> ModelResult<ThrustStage> {
    const STAGE: &str = "thrust";
    let momentum = finite(STAGE, "momentum thrust", comb.total_mass_flow * exhaust.velocity)?;
    let pressure_ratio = c
        .pressure_ratio_cap
        .min(exhaust.velocity / c.pressure_ratio_velocity_scale);
    let pressure_differential = op.pressure().value * (pressure_ratio - 1.0);
    let pressure = finite(
        STAGE,
        "pressure thrust",
        pressure_differential * geo.exhaust_area_m2,
    )?;

    Ok(ThrustStage {
        momentum,
        pressure_ratio,
        pressure_differential,
        pressure,
        total: (momentum + pressure).max(0.0),
    })
}

/// Stage 7 output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsStage {
    /// [s]
    pub specific_impulse: f64,
    /// [kW]
    pub jet_power: f64,
    /// [kW]
    pub propulsive_power: f64,
    /// [kW]
    pub fuel_power: f64,
    /// [%]
    pub thermal_efficiency: f64,
    /// [kg/(kW h)], +inf without propulsive power
    pub specific_fuel_consumption: f64,
}

pub fn metrics(
    flows: &MassFlowStage,
    comb: &CombustionStage,
    exhaust: &ExhaustStage,
    thrust: &ThrustStage,
    c: &ModelConstants,
) -> ModelResult<MetricsStage> {
    const STAGE: &str = "metrics";
    let fuel = flows.fuel_mass_flow;
    let specific_impulse = if fuel > 0.0 {
        thrust.total / (fuel * c.gravity)
    } else {
        0.0
    };
    let jet_power = readback::in_kw(units::watts(
        0.5 * comb.total_mass_flow * exhaust.velocity.powi(2),
    ));
    let propulsive_power = finite(STAGE, "propulsive power", c.propulsive_efficiency * jet_power)?;
    let fuel_power = readback::in_kw(units::watts(comb.energy_release));
    let thermal_efficiency = if fuel_power > 0.0 {
        propulsive_power / fuel_power * 100.0
    } else {
        0.0
    };
    let specific_fuel_consumption = if propulsive_power > 0.0 {
        fuel * units::constants::SECONDS_PER_HOUR / propulsive_power
    } else {
        f64::INFINITY
    };

    Ok(MetricsStage {
        specific_impulse: finite(STAGE, "specific impulse", specific_impulse)?,
        jet_power,
        propulsive_power,
        fuel_power,
        thermal_efficiency: finite(STAGE, "thermal efficiency", thermal_efficiency)?,
        specific_fuel_consumption,
    })
}

/// Every intermediate value of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PipelineTrace {
    pub geometry: GeometryStage,
    /// [Hz]
    pub frequency: f64,
    pub flows: MassFlowStage,
    pub combustion: CombustionStage,
    pub exhaust: ExhaustStage,
    pub thrust: ThrustStage,
    pub metrics: MetricsStage,
}

pub fn run(
    g: &GeometrySpec,
    valves: &ValveSpec,
    op: &OperatingSpec,
    fuel: &FuelProperties,
    c: &ModelConstants,
) -> ModelResult<PipelineTrace> {
    let geometry = derive_geometry(g)?;
    let frequency = helmholtz_frequency(g, &geometry, op, c)?;
    let flows = mass_flows(valves, op, frequency, c)?;
    let combustion = combustion(op, fuel, &flows, c)?;
    let exhaust = exhaust_velocity(&combustion, c)?;
    let thrust = thrust(op, &geometry, &combustion, &exhaust, c)?;
    let metrics = metrics(&flows, &combustion, &exhaust, &thrust, c)?;
    Ok(PipelineTrace {
        geometry,
        frequency,
        flows,
        combustion,
        exhaust,
        thrust,
        metrics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pj_core::{FuelType, SampleEngine};

    fn medium_trace() -> PipelineTrace {
        let d = SampleEngine::Medium.design();
        let fuel = FuelProperties::default_for(FuelType::Gasoline);
        run(&d.geometry, &d.valves, &d.operating, &fuel, &ModelConstants::default()).unwrap()
    }

    #[test]
    fn duty_cycle_caps_and_falls_back() {
        let c = ModelConstants::default();
        assert_eq!(duty_cycle(&c, 0.0), 0.3);
        assert_eq!(duty_cycle(&c, 100.0), 0.4);
        assert!((duty_cycle(&c, 250.0) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn mixture_factor_peaks_at_stoichiometric() {
        assert!((mixture_factor(14.7, 14.7) - 1.0).abs() < 1e-12);
        assert!(mixture_factor(14.7, 10.0) < 1.0);
        assert!(mixture_factor(14.7, 20.0) < 1.0);
        assert!((mixture_factor(14.7, 29.4) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn medium_engine_stage_values() {
        let t = medium_trace();
        // Hand calculation with default constants
        assert!(t.frequency > 50.0 && t.frequency < 60.0, "f = {}", t.frequency);
        assert_eq!(t.flows.duty_cycle, 0.4_f64.min(50.0 / t.frequency));
        assert!((t.flows.air_mass_flow - 0.284).abs() < 0.01, "air = {}", t.flows.air_mass_flow);
        assert!((t.combustion.flame_temperature - 2220.0).abs() < 1e-9);
        assert!(t.exhaust.is_clamped());
        assert!((t.exhaust.velocity - 0.8 * (1.4_f64 * 287.0 * 2220.0).sqrt()).abs() < 1e-9);
        assert!(t.thrust.pressure_ratio == 1.2);
        assert!(t.thrust.total > 300.0 && t.thrust.total < 450.0, "T = {}", t.thrust.total);
        assert!(t.metrics.thermal_efficiency > 0.0 && t.metrics.thermal_efficiency < 100.0);
        assert!(t.metrics.specific_fuel_consumption.is_finite());
    }

    #[test]
    fn thrust_is_floored_at_zero() {
        let d = SampleEngine::Medium.design();
        let rich = d.with_field(pj_core::DesignField::AirFuelRatio, 1.0).unwrap();
        let fuel = FuelProperties::default_for(FuelType::Gasoline);
        let t = run(
            &rich.geometry,
            &rich.valves,
            &rich.operating,
            &fuel,
            &ModelConstants::default(),
        )
        .unwrap();
        assert!(t.thrust.momentum + t.thrust.pressure < 0.0);
        assert_eq!(t.thrust.total, 0.0);
        assert_eq!(t.metrics.specific_impulse, 0.0);
    }

    #[test]
    fn overflowing_geometry_fails_in_geometry_stage() {
        let g = GeometrySpec::new(50.0, 15.0, 8.0, 1e160, 80.0).unwrap();
        let err = derive_geometry(&g).unwrap_err();
        assert!(matches!(err, ModelError::Stage { stage: "geometry", .. }));
    }
}
