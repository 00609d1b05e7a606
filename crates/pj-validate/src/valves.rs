//! Valve rule set.

use crate::checks::check_range;
use crate::limits::ValveLimits;
use crate::params::ValveParams;
use crate::result::ValidationResult;
use pj_core::ValveType;

/// `intake_area` is the intake cross-section in cm², taken from the geometry.
pub fn validate_valves(v: &ValveParams, intake_area: f64, limits: &ValveLimits) -> ValidationResult {
    let mut result = ValidationResult::new();

    let valve_type = v.parsed_type();
    if valve_type.is_none() {
        let labels: Vec<&str> = ValveType::ALL.iter().map(|t| t.label()).collect();
        result.add_critical(format!("Valve type must be one of: {}", labels.join(", ")));
    }

    check_range(&mut result, "Number of valves", v.num_valves as f64, limits.num_valves, "");
    check_range(&mut result, "Valve area", v.valve_area, limits.valve_area, "cm²");

    if v.valve_area <= 0.0 {
        result.add_critical("Valve area must be positive");
    }

    let per_valve = v.area_per_valve();
    if v.num_valves > 0 && v.valve_area > 0.0 {
        if per_valve < 1.0 {
            result.add_critical(format!(
                "Area per valve ({per_valve:.2} cm²) is very small - may be impractical"
            ));
        } else if per_valve > 20.0 {
            result.add_warning(format!(
                "Area per valve ({per_valve:.1} cm²) is very large - may cause structural issues"
            ));
        }
    }

    if intake_area > 0.0 {
        let ratio = v.valve_area / intake_area;
        let area = v.valve_area;
        if ratio < limits.valve_to_intake_ratio.min {
            result.add_critical(format!(
                "Valve area ({area:.1} cm²) is small relative to intake area ({intake_area:.1} cm²) - may restrict breathing"
            ));
        } else if ratio > limits.valve_to_intake_ratio.max {
            result.add_warning(format!(
                "Valve area ({area:.1} cm²) is large relative to intake area ({intake_area:.1} cm²) - check design"
            ));
        }
    }

    if let Some(kind) = valve_type {
        check_valve_family(&mut result, kind, v.num_valves, per_valve);
    }

    result
}

fn check_valve_family(result: &mut ValidationResult, kind: ValveType, count: i64, per_valve: f64) {
    match kind {
        ValveType::Reed => {
            if count > 12 {
                result.add_warning("Reed valve designs typically use 12 or fewer valves");
            } else if count < 2 {
                result.add_info("Reed valve engines typically need at least 2 valves for reliability");
            }
            if per_valve > 15.0 {
                result.add_warning("Individual reed valves larger than 15 cm² may have flutter issues");
            }
        }
        ValveType::Flapper => {
            if count > 6 {
                result.add_warning("Flapper valve designs typically use 6 or fewer valves");
            }
            if per_valve < 5.0 {
                result.add_info("Flapper valves typically need larger individual areas (>5 cm²)");
            }
        }
        ValveType::Rotary => {
            if count > 2 {
                result.add_warning("Rotary valve designs typically use 1-2 valves");
            }
            if count > 1 {
                result.add_info("Multiple rotary valves require complex synchronization");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::{NORMAL, PERMISSIVE, STRICT};

    const MEDIUM_INTAKE: f64 = 50.265;

    fn reeds(num_valves: i64, valve_area: f64) -> ValveParams {
        ValveParams {
            valve_type: "Reed Valves".to_string(),
            num_valves,
            valve_area,
        }
    }

    #[test]
    fn medium_engine_passes_normal_fails_strict_ratio() {
        let v = reeds(4, 20.0);
        assert!(validate_valves(&v, MEDIUM_INTAKE, &NORMAL.valves).is_empty());

        let strict = validate_valves(&v, MEDIUM_INTAKE, &STRICT.valves);
        assert!(!strict.is_valid);
        assert!(strict.contains("is small relative to intake area (50.3 cm²) - may restrict breathing"));
    }

    #[test]
    fn unknown_type_lists_the_choices() {
        let v = ValveParams {
            valve_type: "Poppet".to_string(),
            ..reeds(4, 20.0)
        };
        let r = validate_valves(&v, MEDIUM_INTAKE, &NORMAL.valves);
        assert_eq!(
            r.errors,
            vec!["Valve type must be one of: Reed Valves, Flapper Valves, Rotary Valves".to_string()]
        );
    }

    #[test]
    fn tiny_valves_are_impractical() {
        let r = validate_valves(&reeds(12, 10.0), MEDIUM_INTAKE, &NORMAL.valves);
        assert!(r.contains("Area per valve (0.83 cm²) is very small"));
        assert!(!r.is_valid);
    }

    #[test]
    fn family_heuristics() {
        let rotary = ValveParams {
            valve_type: "rotary".to_string(),
            ..reeds(2, 20.0)
        };
        let r = validate_valves(&rotary, MEDIUM_INTAKE, &NORMAL.valves);
        assert_eq!(r.info, vec!["Multiple rotary valves require complex synchronization".to_string()]);
        assert!(r.warnings.is_empty());

        let triple = ValveParams {
            valve_type: "rotary".to_string(),
            ..reeds(3, 20.0)
        };
        let r = validate_valves(&triple, MEDIUM_INTAKE, &PERMISSIVE.valves);
        assert!(r.warnings.contains(&"Rotary valve designs typically use 1-2 valves".to_string()));
        assert_eq!(r.info, vec!["Multiple rotary valves require complex synchronization".to_string()]);

        let single_reed = validate_valves(&reeds(1, 20.0), MEDIUM_INTAKE, &NORMAL.valves);
        assert!(single_reed.contains("at least 2 valves"));
        assert!(single_reed.contains("flutter issues"));
        assert!(single_reed.is_valid);
    }

    #[test]
    fn zero_count_and_area() {
        let r = validate_valves(&reeds(0, 0.0), MEDIUM_INTAKE, &NORMAL.valves);
        assert!(r.contains("Number of valves (0) is below minimum (1)"));
        assert!(r.contains("Valve area must be positive"));
        assert!(!r.contains("Area per valve"));
    }
}
