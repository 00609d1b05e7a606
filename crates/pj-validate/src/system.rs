//! Rules spanning more than one parameter group.
//!
//! The frequency and thrust estimates here are deliberately coarse and do
//! not call the performance model, so validation can run first.

use crate::params::DesignParams;
use crate::result::ValidationResult;
use pj_core::{FuelType, ValveType};

/// Empirical scale of the geometry-only frequency estimates, Hz·cm
const FREQUENCY_SCALE: f64 = 15000.0;
/// Rough thrust per liter of chamber volume, N/L
const THRUST_PER_LITER: f64 = 20.0;

fn estimated_frequency(exhaust_length: f64, effective_length: f64) -> Option<f64> {
    let product = exhaust_length * effective_length;
    (product > 0.0).then(|| FREQUENCY_SCALE / product.sqrt())
}

/// Cross-parameter consistency and performance feasibility.
pub fn validate_cross_parameters(p: &DesignParams) -> ValidationResult {
    let mut result = ValidationResult::new();
    let g = &p.geometry;
    let volume = g.chamber_volume_liters();
    let count = p.valves.num_valves;

    if volume < 0.5 && count > 6 {
        result.add_warning("Too many valves for small engine size - may cause packaging issues");
    } else if volume > 10.0 && count < 4 {
        result.add_warning("Too few valves for large engine size - may restrict breathing");
    }

    if p.operating.parsed_fuel() == Some(FuelType::Hydrogen) {
        if volume > 5.0 {
            result.add_warning("Large combustion volume with hydrogen may pose safety risks");
        }
        if p.valves.parsed_type() == Some(ValveType::Reed) {
            result.add_info("Reed valves with hydrogen may have durability concerns");
        }
    }

    if p.operating.ambient_temp < 0.0 && g.exhaust_length > 150.0 {
        result.add_info("Long exhaust length in cold conditions may cause condensation issues");
    }

    let effective = g.combustion_chamber_length + g.exhaust_length / 3.0;
    if let Some(freq) = estimated_frequency(g.exhaust_length, effective) {
        if freq < 10.0 {
            result.add_warning("Estimated frequency is very low - engine may not operate properly");
        } else if freq > 500.0 {
            result.add_warning("Estimated frequency is very high - may cause structural issues");
        }
    }

    if volume * THRUST_PER_LITER < 5.0 {
        result.add_info("Configuration may produce very low thrust");
    }

    if g.combustion_chamber_diameter > 0.0 && g.intake_diameter > 0.0 {
        let ld = g.combustion_chamber_length / g.combustion_chamber_diameter;
        let area_ratio = (g.exhaust_diameter / g.intake_diameter).powi(2);
        if ld > 6.0 && area_ratio < 1.2 {
            result.add_warning("Long chamber with small exhaust may cause poor scavenging");
        }
    }

    result
}

pub fn validate_safety(p: &DesignParams) -> ValidationResult {
    let mut result = ValidationResult::new();
    let g = &p.geometry;
    let op = &p.operating;
    let volume = g.chamber_volume_liters();

    match op.parsed_fuel() {
        Some(FuelType::Hydrogen) => {
            if volume > 2.0 {
                result.add_critical("Large hydrogen engine poses explosion risk - consider safety measures");
            }
            result.add_warning("Hydrogen fuel requires special handling and ventilation");
        }
        Some(FuelType::Gasoline | FuelType::Kerosene) if volume > 20.0 => {
            result.add_warning("Very large combustion volume poses fire risk");
        }
        _ => {}
    }

    if op.ambient_pressure > 110.0 {
        result.add_warning("High pressure operation may exceed design limits");
    }
    if op.ambient_temp > 50.0 {
        result.add_warning("High temperature operation may cause overheating");
    }

    if let Some(freq) = estimated_frequency(g.exhaust_length, g.combustion_chamber_length) {
        if freq > 300.0 {
            result.add_critical("High frequency operation may cause fatigue failure");
        }
    }

    if g.exhaust_length > 200.0 {
        result.add_warning("Very long exhaust may pose mounting and vibration challenges");
    }

    result
}

pub fn validate_manufacturing(p: &DesignParams) -> ValidationResult {
    let mut result = ValidationResult::new();
    let g = &p.geometry;
    let v = &p.valves;

    if g.intake_diameter.min(g.exhaust_diameter) < 5.0 {
        result.add_warning("Very small diameters may be difficult to machine accurately");
    }

    let diameter = g.combustion_chamber_diameter;
    if diameter > 30.0 {
        result.add_info("Large diameter chambers require thick walls - consider weight impact");
    }
    if diameter > 0.0 && g.combustion_chamber_length / diameter > 8.0 {
        result.add_warning("High aspect ratio chambers are difficult to machine");
    }

    if v.num_valves > 10 {
        result.add_info("Many valves increase manufacturing complexity and cost");
    }
    if v.num_valves > 0 {
        let per_valve = v.area_per_valve();
        if per_valve < 2.0 {
            result.add_warning("Very small individual valves may be difficult to manufacture");
        } else if per_valve > 25.0 {
            result.add_warning("Very large individual valves may have structural challenges");
        }
    }

    // 1% diameter tolerance
    if diameter * 0.01 < 0.1 {
        result.add_info("Tight tolerances required - may increase manufacturing cost");
    }

    result
}
