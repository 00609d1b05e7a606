//! Batch driver around a borrowed performance model.

use crate::error::{OptimizeError, OptimizeResult};
use pj_core::EngineDesign;
use pj_model::{PerformanceModel, PerformanceResult};

/// Grid resolution used when none is configured.
pub const DEFAULT_GRID_POINTS: usize = 5;
/// Relative perturbation for sensitivity coefficients.
pub const DEFAULT_RELATIVE_STEP: f64 = 0.01;

/// Re-evaluates a model over perturbed copies of a baseline design.
///
/// The model is only read; every batch point works on its own design copy.
#[derive(Debug, Clone, Copy)]
pub struct Optimizer<'m> {
    model: &'m PerformanceModel,
    grid_points: usize,
    relative_step: f64,
}

impl<'m> Optimizer<'m> {
    pub fn new(model: &'m PerformanceModel) -> Self {
        Self {
            model,
            grid_points: DEFAULT_GRID_POINTS,
            relative_step: DEFAULT_RELATIVE_STEP,
        }
    }

    /// Points per grid dimension, at least 2.
    pub fn with_grid_resolution(mut self, points: usize) -> OptimizeResult<Self> {
        if points < 2 {
            return Err(OptimizeError::InvalidArg {
                what: "grid resolution must be at least 2 points per dimension",
            });
        }
        self.grid_points = points;
        Ok(self)
    }

    /// Sensitivity step as a fraction of the baseline value.
    pub fn with_relative_step(mut self, step: f64) -> OptimizeResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(OptimizeError::InvalidArg {
                what: "relative step must be positive and finite",
            });
        }
        self.relative_step = step;
        Ok(self)
    }

    pub fn model(&self) -> &'m PerformanceModel {
        self.model
    }

    pub fn grid_points(&self) -> usize {
        self.grid_points
    }

    pub fn relative_step(&self) -> f64 {
        self.relative_step
    }

    /// Reject a baseline the model cannot evaluate before any batch work.
    pub(crate) fn baseline(&self, design: &EngineDesign) -> OptimizeResult<PerformanceResult> {
        self.model
            .evaluate_design_checked(design)
            .map_err(OptimizeError::InvalidBaseline)
    }
}
