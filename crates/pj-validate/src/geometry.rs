//! Geometry rule set.

use crate::checks::check_range;
use crate::limits::{Bounds, GeometryLimits};
use crate::params::GeometryParams;
use crate::result::ValidationResult;
use std::f64::consts::PI;

const MIN_VOLUME_L: f64 = 0.05;
const MAX_VOLUME_L: f64 = 50.0;
const HIGH_SURFACE_PER_LITER: f64 = 2000.0;
const LOW_SURFACE_PER_LITER: f64 = 200.0;
const MIN_EXHAUST_LD: f64 = 3.0;
const MAX_EXHAUST_LD: f64 = 20.0;
/// Nominal volumetric flow for the velocity estimates, m³/s
const NOMINAL_FLOW: f64 = 0.1;
/// Nominal air density for the velocity estimates, kg/m³
const NOMINAL_DENSITY: f64 = 1.2;
const MAX_INTAKE_VELOCITY: f64 = 100.0;
const SONIC_EXHAUST_VELOCITY: f64 = 300.0;

pub fn validate_geometry(g: &GeometryParams, limits: &GeometryLimits) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_range(
        &mut result,
        "Combustion chamber length",
        g.combustion_chamber_length,
        limits.combustion_chamber_length,
        "cm",
    );
    check_range(
        &mut result,
        "Combustion chamber diameter",
        g.combustion_chamber_diameter,
        limits.combustion_chamber_diameter,
        "cm",
    );
    check_range(&mut result, "Intake diameter", g.intake_diameter, limits.intake_diameter, "cm");
    check_range(
        &mut result,
        "Exhaust diameter",
        g.exhaust_diameter,
        limits.exhaust_diameter,
        "cm",
    );
    check_range(&mut result, "Exhaust length", g.exhaust_length, limits.exhaust_length, "cm");

    let diameter = g.combustion_chamber_diameter;
    if g.intake_diameter >= diameter {
        result.add_critical("Intake diameter must be smaller than combustion chamber diameter");
    }
    if g.exhaust_diameter > diameter * 1.2 {
        result.add_critical(format!(
            "Exhaust diameter ({:.1} cm) is too large relative to chamber diameter ({diameter:.1} cm)",
            g.exhaust_diameter
        ));
    }

    if diameter > 0.0 {
        let ld = g.combustion_chamber_length / diameter;
        check_ratio(
            &mut result,
            ld,
            limits.ld_ratio,
            RatioMessages {
                label: format!("L/D ratio ({ld:.1})"),
                too_low: format!("is too low (minimum {:.1}) - may cause incomplete combustion", limits.ld_ratio.min),
                too_high: format!("is too high (maximum {:.1}) - may cause excessive heat loss", limits.ld_ratio.max),
                near_low: "is borderline low - consider increasing length",
                near_high: "is borderline high - may reduce efficiency",
            },
        );
    }

    let intake_area = g.intake_area_cm2();
    if intake_area > 0.0 {
        let ratio = g.exhaust_area_cm2() / intake_area;
        check_ratio(
            &mut result,
            ratio,
            limits.area_ratio,
            RatioMessages {
                label: format!("Exhaust/intake area ratio ({ratio:.2})"),
                too_low: "is too low - may restrict flow".to_string(),
                too_high: "is too high - may affect resonance tuning".to_string(),
                near_low: "is borderline low - may limit exhaust flow",
                near_high: "is borderline high - may weaken resonance",
            },
        );
    }

    check_volume(&mut result, g);
    check_exhaust(&mut result, g);
    check_flow_velocities(&mut result, g);

    result
}

struct RatioMessages {
    label: String,
    too_low: String,
    too_high: String,
    near_low: &'static str,
    near_high: &'static str,
}

/// Critical outside `bounds`, warning within 20% of either limit.
fn check_ratio(result: &mut ValidationResult, value: f64, bounds: Bounds, msg: RatioMessages) {
    let label = msg.label;
    if value < bounds.min {
        result.add_critical(format!("{label} {}", msg.too_low));
    } else if value > bounds.max {
        result.add_critical(format!("{label} {}", msg.too_high));
    } else if value < bounds.min * 1.2 {
        result.add_warning(format!("{label} {}", msg.near_low));
    } else if value > bounds.max * 0.8 {
        result.add_warning(format!("{label} {}", msg.near_high));
    }
}

fn check_volume(result: &mut ValidationResult, g: &GeometryParams) {
    let volume = g.chamber_volume_liters();
    if volume < MIN_VOLUME_L {
        result.add_warning(format!(
            "Combustion volume ({volume:.3} L) is very small - may have poor combustion"
        ));
    } else if volume > MAX_VOLUME_L {
        result.add_warning(format!(
            "Combustion volume ({volume:.1} L) is very large - consider weight implications"
        ));
    }

    if volume <= 0.0 {
        return;
    }
    // closed cylinder: two end caps plus the wall
    let d = g.combustion_chamber_diameter;
    let surface = 2.0 * PI * (d / 2.0).powi(2) + PI * d * g.combustion_chamber_length;
    let per_liter = surface / volume;
    if per_liter > HIGH_SURFACE_PER_LITER {
        result.add_warning(format!(
            "High surface area to volume ratio ({per_liter:.0} cm²/L) - may cause excessive heat loss"
        ));
    } else if per_liter < LOW_SURFACE_PER_LITER {
        result.add_info(format!(
            "Low surface area to volume ratio ({per_liter:.0} cm²/L) - may have poor heat transfer"
        ));
    }
}

fn check_exhaust(result: &mut ValidationResult, g: &GeometryParams) {
    if g.exhaust_diameter <= 0.0 {
        return;
    }
    let ld = g.exhaust_length / g.exhaust_diameter;
    if ld < MIN_EXHAUST_LD {
        result.add_warning(format!(
            "Exhaust L/D ratio ({ld:.1}) is very low - may cause poor expansion"
        ));
    } else if ld > MAX_EXHAUST_LD {
        result.add_warning(format!(
            "Exhaust L/D ratio ({ld:.1}) is very high - may cause excessive friction losses"
        ));
    }
}

fn nominal_velocity(area_cm2: f64) -> Option<f64> {
    (area_cm2 > 0.0).then(|| NOMINAL_FLOW / (NOMINAL_DENSITY * area_cm2 / 1e4))
}

fn check_flow_velocities(result: &mut ValidationResult, g: &GeometryParams) {
    if let Some(v) = nominal_velocity(g.intake_area_cm2()) {
        if v > MAX_INTAKE_VELOCITY {
            result.add_warning(format!(
                "Estimated intake velocity ({v:.0} m/s) is high - may cause choking"
            ));
        }
    }
    if let Some(v) = nominal_velocity(g.exhaust_area_cm2()) {
        if v > SONIC_EXHAUST_VELOCITY {
            result.add_info(format!(
                "Estimated exhaust velocity ({v:.0} m/s) may approach sonic conditions"
            ));
        }
    }
}
