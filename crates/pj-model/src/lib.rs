//! pj-model: closed-form pulse-jet performance model.
//!
//! Contains:
//! - constants (named physical and empirical constants, serde-overridable)
//! - pipeline (the seven calculation stages as pure functions)
//! - result (performance result aggregate)
//! - model (the evaluating facade with never-fail and checked entry points)

pub mod constants;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod result;

pub use constants::ModelConstants;
pub use error::{ModelError, ModelResult};
pub use model::PerformanceModel;
pub use pipeline::PipelineTrace;
pub use result::{AnalysisStatus, PerformanceResult};
