//! Entry points tying the rule sets together.

use crate::geometry::validate_geometry;
use crate::limits::Tier;
use crate::operating::validate_operating;
use crate::params::DesignParams;
use crate::result::ValidationResult;
use crate::sanitize::{RawDesign, sanitize};
use crate::system::{validate_cross_parameters, validate_manufacturing, validate_safety};
use crate::valves::validate_valves;
use pj_core::{DesignField, FuelTable};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Runs every rule set at one tier. Stateless: the same input always
/// produces the same findings.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    tier: Tier,
    fuels: FuelTable,
}

impl Validator {
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            fuels: FuelTable::default(),
        }
    }

    /// Use `fuels` for stoichiometric ratios instead of the built-in table.
    pub fn with_fuels(mut self, fuels: FuelTable) -> Self {
        self.fuels = fuels;
        self
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn validate(&self, params: &DesignParams) -> DesignValidation {
        let limits = self.tier.limits();
        let validation = DesignValidation {
            tier: self.tier,
            input: ValidationResult::new(),
            geometry: validate_geometry(&params.geometry, &limits.geometry),
            valves: validate_valves(&params.valves, params.geometry.intake_area_cm2(), &limits.valves),
            operating: validate_operating(&params.operating, &limits.operating, &self.fuels),
            system: validate_cross_parameters(params),
            safety: validate_safety(params),
            manufacturing: validate_manufacturing(params),
        };
        debug!(
            tier = %self.tier,
            acceptable = validation.is_acceptable(),
            findings = validation.overall().len(),
            "design validated"
        );
        validation
    }

    /// Sanitize free-form input, then validate it.
    pub fn validate_raw(&self, raw: &RawDesign) -> (DesignParams, DesignValidation) {
        let (params, input) = sanitize(raw);
        let mut validation = self.validate(&params);
        validation.input = input;
        (params, validation)
    }
}

/// Findings per rule set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignValidation {
    pub tier: Tier,
    /// Coercion failures; empty unless produced by [`Validator::validate_raw`]
    pub input: ValidationResult,
    pub geometry: ValidationResult,
    pub valves: ValidationResult,
    pub operating: ValidationResult,
    pub system: ValidationResult,
    pub safety: ValidationResult,
    pub manufacturing: ValidationResult,
}

impl DesignValidation {
    pub fn sections(&self) -> [(&'static str, &ValidationResult); 7] {
        [
            ("Input", &self.input),
            ("Geometry", &self.geometry),
            ("Valves", &self.valves),
            ("Operating", &self.operating),
            ("System", &self.system),
            ("Safety", &self.safety),
            ("Manufacturing", &self.manufacturing),
        ]
    }

    /// All sections merged in order, each message tagged with its section.
    pub fn overall(&self) -> ValidationResult {
        self.sections()
            .into_iter()
            .map(|(name, section)| section.clone().prefixed(&format!("{name}: ")))
            .collect()
    }

    pub fn is_acceptable(&self) -> bool {
        self.sections().iter().all(|(_, s)| s.is_valid)
    }
}

impl fmt::Display for DesignValidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_acceptable() {
            writeln!(f, "Validation ({}): PASSED", self.tier)?;
        } else {
            writeln!(f, "Validation ({}): ISSUES FOUND", self.tier)?;
        }
        for (name, section) in self.sections() {
            if section.is_empty() {
                continue;
            }
            writeln!(f, "\n{name}")?;
            for (severity, message) in section.messages() {
                writeln!(f, "  [{severity}] {message}")?;
            }
        }
        Ok(())
    }
}

/// Range-check one field against a tier; fields without tier bounds pass.
pub fn validate_single_parameter(field: DesignField, value: f64, tier: Tier) -> Result<(), String> {
    let Some(bounds) = tier.limits().bounds_for(field) else {
        return Ok(());
    };
    let name = field.key();
    if !value.is_finite() {
        Err(format!("{name} must be a valid number"))
    } else if value < bounds.min {
        Err(format!("{name} ({value}) is below minimum ({})", bounds.min))
    } else if value > bounds.max {
        Err(format!("{name} ({value}) is above maximum ({})", bounds.max))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_parameter_checks() {
        assert!(validate_single_parameter(DesignField::ChamberLength, 50.0, Tier::Normal).is_ok());
        assert_eq!(
            validate_single_parameter(DesignField::ChamberLength, 90.0, Tier::Strict),
            Err("combustion_chamber_length (90) is above maximum (80)".to_string())
        );
        assert!(validate_single_parameter(DesignField::AirFuelRatio, -5.0, Tier::Strict).is_ok());
        assert!(validate_single_parameter(DesignField::AmbientTemp, f64::NAN, Tier::Permissive).is_err());
    }

    #[test]
    fn overall_prefixes_by_section() {
        let mut v = DesignValidation {
            tier: Tier::Normal,
            input: ValidationResult::new(),
            geometry: ValidationResult::new(),
            valves: ValidationResult::new(),
            operating: ValidationResult::new(),
            system: ValidationResult::new(),
            safety: ValidationResult::new(),
            manufacturing: ValidationResult::new(),
        };
        v.safety.add_critical("boom");
        v.geometry.add_info("note");
        let overall = v.overall();
        assert_eq!(overall.errors, vec!["Safety: boom".to_string()]);
        assert_eq!(overall.info, vec!["Geometry: note".to_string()]);
        assert!(!v.is_acceptable());
    }
}
