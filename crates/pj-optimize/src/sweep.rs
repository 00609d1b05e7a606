//! Single-field parameter sweeps.

use crate::error::{OptimizeError, OptimizeResult};
use crate::optimizer::Optimizer;
use crate::points::linspace;
use pj_core::{DesignField, EngineDesign};
use pj_model::PerformanceResult;
use serde::Serialize;
use tracing::warn;

/// Column-oriented sweep output, one entry per input value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepTable {
    pub field: DesignField,
    pub values: Vec<f64>,
    /// [N]
    pub thrust: Vec<f64>,
    /// [Hz]
    pub frequency: Vec<f64>,
    /// [s]
    pub specific_impulse: Vec<f64>,
    /// [%]
    pub thermal_efficiency: Vec<f64>,
    /// [kW]
    pub power: Vec<f64>,
    /// [kg/h]
    pub fuel_consumption: Vec<f64>,
    pub failed: Vec<bool>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl SweepTable {
    fn new(field: DesignField, capacity: usize) -> Self {
        let col = || Vec::with_capacity(capacity);
        Self {
            field,
            values: col(),
            thrust: col(),
            frequency: col(),
            specific_impulse: col(),
            thermal_efficiency: col(),
            power: col(),
            fuel_consumption: col(),
            failed: Vec::with_capacity(capacity),
            num_successful: 0,
            num_failed: 0,
        }
    }

    fn push(&mut self, value: f64, result: Option<&PerformanceResult>) {
        self.values.push(value);
        let zero = PerformanceResult::failed();
        let r = result.unwrap_or(&zero);
        self.thrust.push(r.thrust);
        self.frequency.push(r.frequency);
        self.specific_impulse.push(r.specific_impulse);
        self.thermal_efficiency.push(r.thermal_efficiency);
        self.power.push(r.power);
        self.fuel_consumption.push(r.fuel_consumption_rate);
        self.failed.push(result.is_none());
        if result.is_some() {
            self.num_successful += 1;
        } else {
            self.num_failed += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of the largest value in a column, skipping failed points.
    pub fn argmax(&self, column: &[f64]) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, v) in column.iter().enumerate() {
            if self.failed.get(i).copied().unwrap_or(true) {
                continue;
            }
            if best.is_none_or(|b| *v > column[b]) {
                best = Some(i);
            }
        }
        best
    }
}

impl Optimizer<'_> {
    /// Evaluate the design once per value with `field` overridden.
    ///
    /// A point that cannot be built or evaluated is recorded as zeros and
    /// flagged; the rest of the sweep continues.
    pub fn sweep(
        &self,
        design: &EngineDesign,
        field: DesignField,
        values: &[f64],
    ) -> OptimizeResult<SweepTable> {
        self.baseline(design)?;
        let mut table = SweepTable::new(field, values.len());

        for &value in values {
            let result = match design.with_field(field, value) {
                Ok(point) => {
                    let r = self.model().evaluate_design(&point);
                    if r.is_failed() {
                        warn!(%field, value, "sweep point failed to evaluate");
                        None
                    } else {
                        Some(r)
                    }
                }
                Err(err) => {
                    warn!(%field, value, %err, "sweep point rejected");
                    None
                }
            };
            table.push(value, result.as_ref());
        }
        Ok(table)
    }

    pub fn sweep_range(
        &self,
        design: &EngineDesign,
        field: DesignField,
        start: f64,
        end: f64,
        points: usize,
    ) -> OptimizeResult<SweepTable> {
        if points == 0 || !start.is_finite() || !end.is_finite() {
            return Err(OptimizeError::InvalidRange {
                field,
                min: start,
                max: end,
            });
        }
        self.sweep(design, field, &linspace(start, end, points))
    }
}
