use pj_core::{DesignField, PjError};
use pj_model::ModelError;
use thiserror::Error;

pub type OptimizeResult<T> = Result<T, OptimizeError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizeError {
    #[error("Core error: {0}")]
    Core(#[from] PjError),

    #[error("Baseline design cannot be evaluated: {0}")]
    InvalidBaseline(#[source] ModelError),

    #[error("Grid search supports 1 to 3 fields, got {count}")]
    GridDimensions { count: usize },

    #[error("Field {field} appears more than once in the grid")]
    DuplicateField { field: DesignField },

    #[error("Invalid range for {field}: [{min}, {max}]")]
    InvalidRange {
        field: DesignField,
        min: f64,
        max: f64,
    },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
