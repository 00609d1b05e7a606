//! pj-optimize: batch studies over the performance model.
//!
//! Contains:
//! - optimizer (the batch driver wrapping a borrowed model)
//! - sweep (single-field sweeps with per-point failure isolation)
//! - grid (1-3 field exhaustive search, parallel evaluation)
//! - sensitivity (finite-difference thrust elasticities)
//! - suggestions, tradeoffs, score (design feedback)

pub mod error;
pub mod grid;
pub mod optimizer;
pub mod points;
pub mod score;
pub mod sensitivity;
pub mod suggestions;
pub mod sweep;
pub mod tradeoffs;

pub use error::{OptimizeError, OptimizeResult};
pub use grid::{GridRange, GridRow, GridSearchReport, Goal, Objective};
pub use optimizer::{DEFAULT_GRID_POINTS, DEFAULT_RELATIVE_STEP, Optimizer};
pub use points::linspace;
pub use score::design_score;
pub use sensitivity::{DEFAULT_SENSITIVITY_FIELDS, SensitivityEntry, SensitivityReport};
pub use suggestions::{SuggestionCategory, suggestions};
pub use sweep::SweepTable;
pub use tradeoffs::{TradeOff, trade_offs};
