use crate::limits::Bounds;
use crate::result::ValidationResult;

/// Critical finding when `value` is non-finite or outside `bounds`.
pub(crate) fn check_range(
    result: &mut ValidationResult,
    name: &str,
    value: f64,
    bounds: Bounds,
    units: &str,
) {
    let unit = if units.is_empty() {
        String::new()
    } else {
        format!(" {units}")
    };
    if !value.is_finite() {
        result.add_critical(format!("{name} must be a valid number"));
    } else if value < bounds.min {
        result.add_critical(format!(
            "{name} ({value}{unit}) is below minimum ({}{unit})",
            bounds.min
        ));
    } else if value > bounds.max {
        result.add_critical(format!(
            "{name} ({value}{unit}) is above maximum ({}{unit})",
            bounds.max
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_messages() {
        let mut r = ValidationResult::new();
        check_range(&mut r, "Exhaust length", 250.0, Bounds::new(20.0, 200.0), "cm");
        check_range(&mut r, "Number of valves", 0.0, Bounds::new(1.0, 12.0), "");
        check_range(&mut r, "Valve area", f64::NAN, Bounds::new(5.0, 50.0), "cm²");
        check_range(&mut r, "Valve area", 20.0, Bounds::new(5.0, 50.0), "cm²");
        assert_eq!(
            r.errors,
            vec![
                "Exhaust length (250 cm) is above maximum (200 cm)".to_string(),
                "Number of valves (0) is below minimum (1)".to_string(),
                "Valve area must be a valid number".to_string(),
            ]
        );
    }
}
