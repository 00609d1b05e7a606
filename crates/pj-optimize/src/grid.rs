//! Low-dimensional exhaustive grid search.
//!
//! Combinations are evaluated in parallel and collected in enumeration
//! order, so the best-row reduction (strict comparison, first seen wins)
//! gives the same answer as a sequential run.

use crate::error::{OptimizeError, OptimizeResult};
use crate::optimizer::Optimizer;
use crate::points::{cartesian, linspace};
use pj_core::{DesignField, EngineDesign, PjError, PjResult};
use pj_model::PerformanceResult;
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use tracing::warn;

pub const MAX_GRID_DIMENSIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Maximize,
    Minimize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    Thrust,
    ThermalEfficiency,
    SpecificImpulse,
    SpecificFuelConsumption,
}

impl Objective {
    pub const ALL: [Objective; 4] = [
        Objective::Thrust,
        Objective::ThermalEfficiency,
        Objective::SpecificImpulse,
        Objective::SpecificFuelConsumption,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Objective::Thrust => "thrust",
            Objective::ThermalEfficiency => "efficiency",
            Objective::SpecificImpulse => "specific_impulse",
            Objective::SpecificFuelConsumption => "sfc",
        }
    }

    pub fn goal(&self) -> Goal {
        match self {
            Objective::SpecificFuelConsumption => Goal::Minimize,
            _ => Goal::Maximize,
        }
    }

    pub fn value(&self, r: &PerformanceResult) -> f64 {
        match self {
            Objective::Thrust => r.thrust,
            Objective::ThermalEfficiency => r.thermal_efficiency,
            Objective::SpecificImpulse => r.specific_impulse,
            Objective::SpecificFuelConsumption => r.specific_fuel_consumption,
        }
    }

    /// Strictly better; ties keep the incumbent.
    pub fn improves(&self, candidate: f64, incumbent: f64) -> bool {
        match self.goal() {
            Goal::Maximize => candidate > incumbent,
            Goal::Minimize => candidate < incumbent,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Objective {
    type Err = PjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "thrust" => Ok(Objective::Thrust),
            "efficiency" | "thermal_efficiency" => Ok(Objective::ThermalEfficiency),
            "specific_impulse" | "isp" => Ok(Objective::SpecificImpulse),
            "sfc" | "specific_fuel_consumption" => Ok(Objective::SpecificFuelConsumption),
            _ => Err(PjError::UnknownVariant {
                kind: "objective",
                name: s.to_string(),
            }),
        }
    }
}

/// Closed interval searched for one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridRange {
    pub field: DesignField,
    pub min: f64,
    pub max: f64,
}

impl GridRange {
    pub fn new(field: DesignField, min: f64, max: f64) -> Self {
        Self { field, min, max }
    }
}

/// One evaluated combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    /// Aligned with [`GridSearchReport::fields`]
    pub values: Vec<f64>,
    pub design: EngineDesign,
    pub result: PerformanceResult,
    pub objective_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSearchReport {
    pub objective: Objective,
    pub fields: Vec<DesignField>,
    /// Enumeration order, first field varying slowest
    pub rows: Vec<GridRow>,
    pub best_index: Option<usize>,
    /// Combinations whose design could not be built
    pub num_failed: usize,
}

impl GridSearchReport {
    pub fn num_evaluated(&self) -> usize {
        self.rows.len()
    }

    pub fn best(&self) -> Option<&GridRow> {
        self.best_index.and_then(|i| self.rows.get(i))
    }

    pub fn best_configuration(&self) -> Option<&EngineDesign> {
        self.best().map(|row| &row.design)
    }

    pub fn best_value(&self) -> Option<f64> {
        self.best().map(|row| row.objective_value)
    }
}

fn check_ranges(ranges: &[GridRange]) -> OptimizeResult<()> {
    if ranges.is_empty() || ranges.len() > MAX_GRID_DIMENSIONS {
        return Err(OptimizeError::GridDimensions {
            count: ranges.len(),
        });
    }
    for (i, r) in ranges.iter().enumerate() {
        if !r.min.is_finite() || !r.max.is_finite() || r.min > r.max {
            return Err(OptimizeError::InvalidRange {
                field: r.field,
                min: r.min,
                max: r.max,
            });
        }
        if ranges[..i].iter().any(|prev| prev.field == r.field) {
            return Err(OptimizeError::DuplicateField { field: r.field });
        }
    }
    Ok(())
}

fn apply(design: &EngineDesign, fields: &[DesignField], values: &[f64]) -> PjResult<EngineDesign> {
    fields
        .iter()
        .zip(values)
        .try_fold(*design, |d, (&field, &value)| d.with_field(field, value))
}

impl Optimizer<'_> {
    pub fn grid_search(
        &self,
        design: &EngineDesign,
        ranges: &[GridRange],
        objective: Objective,
    ) -> OptimizeResult<GridSearchReport> {
        check_ranges(ranges)?;
        self.baseline(design)?;

        let fields: Vec<DesignField> = ranges.iter().map(|r| r.field).collect();
        let axes: Vec<Vec<f64>> = ranges
            .iter()
            .map(|r| linspace(r.min, r.max, self.grid_points()))
            .collect();
        let combos = cartesian(&axes);

        let model = self.model();
        let evaluated: Vec<Option<GridRow>> = combos
            .par_iter()
            .map(|values| match apply(design, &fields, values) {
                Ok(point) => {
                    let result = model.evaluate_design(&point);
                    Some(GridRow {
                        values: values.clone(),
                        design: point,
                        objective_value: objective.value(&result),
                        result,
                    })
                }
                Err(err) => {
                    warn!(?values, %err, "grid point rejected");
                    None
                }
            })
            .collect();

        let total = evaluated.len();
        let rows: Vec<GridRow> = evaluated.into_iter().flatten().collect();

        let mut best_index: Option<usize> = None;
        for (i, row) in rows.iter().enumerate() {
            if row.result.is_failed() {
                continue;
            }
            let better = match best_index {
                None => true,
                Some(b) => objective.improves(row.objective_value, rows[b].objective_value),
            };
            if better {
                best_index = Some(i);
            }
        }

        Ok(GridSearchReport {
            objective,
            fields,
            num_failed: total - rows.len(),
            rows,
            best_index,
        })
    }
}
