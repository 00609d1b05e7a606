//! pj-validate: rule-based checks on pulse-jet designs.
//!
//! Findings are data, never errors. Each rule set returns a
//! [`ValidationResult`]; [`Validator`] runs them all at one [`Tier`].

pub mod geometry;
pub mod limits;
pub mod operating;
pub mod params;
pub mod result;
pub mod sanitize;
pub mod system;
pub mod validator;
pub mod valves;

mod checks;

pub use limits::{
    Bounds, GeometryLimits, OperatingLimits, Tier, TierLimits, ValveLimits, combustible_limits,
    validation_limits,
};
pub use params::{DesignParams, GeometryParams, OperatingParams, ValveParams};
pub use result::{Severity, ValidationResult};
pub use sanitize::{InputError, Quantity, RawDesign, RawValue, parse_quantity, sanitize};
pub use validator::{DesignValidation, Validator, validate_single_parameter};
