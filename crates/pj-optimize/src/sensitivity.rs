//! Finite-difference thrust elasticities.

use crate::error::OptimizeResult;
use crate::optimizer::Optimizer;
use pj_core::{DesignField, EngineDesign};
use serde::Serialize;
use tracing::warn;

/// Fields analyzed when the caller does not name any.
pub const DEFAULT_SENSITIVITY_FIELDS: [DesignField; 4] = [
    DesignField::ExhaustLength,
    DesignField::ChamberDiameter,
    DesignField::AirFuelRatio,
    DesignField::ValveArea,
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensitivityEntry {
    pub field: DesignField,
    pub baseline_value: f64,
    /// Value actually applied; rounding may leave it equal to the baseline
    pub perturbed_value: f64,
    /// Percent thrust change per percent input change
    pub coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityReport {
    /// [N]
    pub baseline_thrust: f64,
    /// In request order
    pub entries: Vec<SensitivityEntry>,
}

impl SensitivityReport {
    pub fn coefficient(&self, field: DesignField) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.coefficient)
    }

    /// Entries sorted by descending magnitude.
    pub fn ranked(&self) -> Vec<SensitivityEntry> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.coefficient.abs().total_cmp(&a.coefficient.abs()));
        ranked
    }
}

impl Optimizer<'_> {
    /// Thrust elasticity of each field around the baseline.
    ///
    /// Zero baseline thrust, a zero input change and any failed
    /// perturbation all yield a coefficient of 0.
    pub fn sensitivity(
        &self,
        design: &EngineDesign,
        fields: &[DesignField],
    ) -> OptimizeResult<SensitivityReport> {
        let baseline = self.baseline(design)?;
        let t0 = baseline.thrust;

        let entries = fields
            .iter()
            .map(|&field| {
                let x0 = design.field_value(field);
                let requested = x0 * (1.0 + self.relative_step());
                let mut entry = SensitivityEntry {
                    field,
                    baseline_value: x0,
                    perturbed_value: x0,
                    coefficient: 0.0,
                };
                if t0 == 0.0 {
                    return entry;
                }
                let point = match design.with_field(field, requested) {
                    Ok(point) => point,
                    Err(err) => {
                        warn!(%field, %err, "sensitivity perturbation rejected");
                        return entry;
                    }
                };
                entry.perturbed_value = point.field_value(field);
                let dx = entry.perturbed_value - x0;
                if dx == 0.0 {
                    return entry;
                }
                let perturbed = self.model().evaluate_design(&point);
                if perturbed.is_failed() {
                    warn!(%field, "sensitivity perturbation failed to evaluate");
                    return entry;
                }
                let thrust_pct = (perturbed.thrust - t0) / t0 * 100.0;
                let input_pct = dx / x0 * 100.0;
                entry.coefficient = thrust_pct / input_pct;
                entry
            })
            .collect();

        Ok(SensitivityReport {
            baseline_thrust: t0,
            entries,
        })
    }

    pub fn default_sensitivity(&self, design: &EngineDesign) -> OptimizeResult<SensitivityReport> {
        self.sensitivity(design, &DEFAULT_SENSITIVITY_FIELDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pj_core::SampleEngine;
    use pj_model::PerformanceModel;

    #[test]
    fn zero_baseline_thrust_gives_zero_coefficients() {
        let model = PerformanceModel::default();
        let opt = Optimizer::new(&model);
        let rich = SampleEngine::Medium
            .design()
            .with_field(DesignField::AirFuelRatio, 1.0)
            .unwrap();

        let report = opt.sensitivity(&rich, &DesignField::ALL).unwrap();
        assert_eq!(report.baseline_thrust, 0.0);
        assert!(report.entries.iter().all(|e| e.coefficient == 0.0));
    }

    #[test]
    fn valve_area_elasticity_is_positive() {
        let model = PerformanceModel::default();
        let opt = Optimizer::new(&model);
        let report = opt.default_sensitivity(&SampleEngine::Medium.design()).unwrap();

        assert_eq!(report.entries.len(), 4);
        assert_eq!(report.entries[0].field, DesignField::ExhaustLength);
        let valve = report.coefficient(DesignField::ValveArea).unwrap();
        assert!(valve > 0.0 && valve < 1.0, "valve area coefficient {valve}");
        assert!((report.entries[3].perturbed_value - 20.2).abs() < 1e-9);
    }

    #[test]
    fn rounded_valve_count_gives_zero_change() {
        let model = PerformanceModel::default();
        let opt = Optimizer::new(&model);
        let report = opt
            .sensitivity(&SampleEngine::Medium.design(), &[DesignField::ValveCount])
            .unwrap();
        let entry = report.entries[0];
        assert_eq!(entry.perturbed_value, entry.baseline_value);
        assert_eq!(entry.coefficient, 0.0);
    }

    #[test]
    fn zero_valued_field_is_not_perturbed() {
        let model = PerformanceModel::default();
        let opt = Optimizer::new(&model);
        let frozen = SampleEngine::Medium
            .design()
            .with_field(DesignField::AmbientTemp, 0.0)
            .unwrap();
        let report = opt.sensitivity(&frozen, &[DesignField::AmbientTemp]).unwrap();
        assert_eq!(report.coefficient(DesignField::AmbientTemp), Some(0.0));
    }
}
