use thiserror::Error;

pub type PjResult<T> = Result<T, PjError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PjError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Value for {what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },

    #[error("Unknown {kind}: '{name}'")]
    UnknownVariant { kind: &'static str, name: String },

    #[error("Unknown design field: '{name}'")]
    UnknownField { name: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
