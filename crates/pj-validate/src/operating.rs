//! Operating-condition rule set.

use crate::checks::check_range;
use crate::limits::{OperatingLimits, combustible_limits};
use crate::params::OperatingParams;
use crate::result::ValidationResult;
use pj_core::units::constants::{ISA_SEA_LEVEL_K, SEA_LEVEL_KPA};
use pj_core::{FuelTable, FuelType};

const LOW_PRESSURE_KPA: f64 = 85.0;
const HIGH_PRESSURE_KPA: f64 = 115.0;
/// Rough km of altitude per kPa below sea level
const KM_PER_KPA: f64 = 8.5;
const COLD_C: f64 = -10.0;
const HOT_C: f64 = 45.0;
const MIN_DENSITY_RATIO: f64 = 0.8;

pub fn validate_operating(
    op: &OperatingParams,
    limits: &OperatingLimits,
    fuels: &FuelTable,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    let fuel = op.parsed_fuel();
    if fuel.is_none() {
        let keys: Vec<&str> = FuelType::ALL.iter().map(|f| f.key()).collect();
        result.add_critical(format!("Fuel type must be one of: {}", keys.join(", ")));
    }

    check_range(
        &mut result,
        "Ambient pressure",
        op.ambient_pressure,
        limits.ambient_pressure,
        "kPa",
    );
    check_range(&mut result, "Ambient temperature", op.ambient_temp, limits.ambient_temp, "°C");

    if op.air_fuel_ratio <= 0.0 {
        result.add_critical("Air-fuel ratio must be positive");
    } else if let Some(fuel) = fuel {
        check_mixture(&mut result, fuel, op.air_fuel_ratio, fuels.stoich_ratio(fuel), limits.afr_tolerance);
    }

    check_environment(&mut result, op.ambient_pressure, op.ambient_temp);
    result
}

fn check_mixture(result: &mut ValidationResult, fuel: FuelType, afr: f64, stoich: f64, tolerance: f64) {
    let deviation = (afr - stoich).abs() / stoich;
    if deviation > tolerance {
        if afr < stoich * (1.0 - tolerance) {
            result.add_critical(format!(
                "Air-fuel ratio ({afr:.1}) is very rich for {fuel} (stoichiometric: {stoich:.1}) - may cause incomplete combustion"
            ));
        } else {
            result.add_critical(format!(
                "Air-fuel ratio ({afr:.1}) is very lean for {fuel} (stoichiometric: {stoich:.1}) - may cause misfire"
            ));
        }
    } else if deviation > tolerance * 0.5 {
        if afr < stoich {
            result.add_warning(format!("Air-fuel ratio ({afr:.1}) is rich - will reduce efficiency"));
        } else {
            result.add_warning(format!("Air-fuel ratio ({afr:.1}) is lean - may reduce power"));
        }
    }

    if let Some(window) = combustible_limits(fuel) {
        if !window.contains(afr) {
            result.add_critical(format!(
                "Air-fuel ratio ({afr:.1}) is outside combustible limits for {} ({}-{})",
                fuel.key().to_lowercase(),
                window.min,
                window.max
            ));
        }
    }
}

fn check_environment(result: &mut ValidationResult, pressure: f64, temperature: f64) {
    if pressure < LOW_PRESSURE_KPA {
        let altitude = (SEA_LEVEL_KPA - pressure) * KM_PER_KPA;
        result.add_warning(format!(
            "Low pressure ({pressure:.1} kPa) indicates high altitude (~{altitude:.1} km) - performance will be reduced"
        ));
    } else if pressure > HIGH_PRESSURE_KPA {
        result.add_info(format!(
            "High pressure ({pressure:.1} kPa) - ensure sea level or below sea level operation"
        ));
    }

    if temperature < COLD_C {
        result.add_warning(format!(
            "Low temperature ({temperature:.0}°C) may cause starting difficulties and affect fuel atomization"
        ));
    } else if temperature > HOT_C {
        result.add_warning(format!(
            "High temperature ({temperature:.0}°C) may reduce air density and affect performance"
        ));
    }

    let absolute = temperature + 273.15;
    if absolute > 0.0 {
        let density_ratio = (pressure / SEA_LEVEL_KPA) * (ISA_SEA_LEVEL_K / absolute);
        if density_ratio < MIN_DENSITY_RATIO {
            result.add_warning(format!(
                "Low air density (ratio: {density_ratio:.2}) will significantly reduce performance"
            ));
        }
    }
}
