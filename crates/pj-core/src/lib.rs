//! pj-core: shared foundation for the pulse-jet estimator.
//!
//! Contains:
//! - units (uom SI types + constructors in design units)
//! - numeric (Real + float guards)
//! - geometry, valve, operating (immutable design entities)
//! - design (the design triple, field lookup and perturbation, sample engines)
//! - fuel (fuel property table with built-in defaults)
//! - error (shared error types)

pub mod design;
pub mod error;
pub mod fuel;
pub mod geometry;
pub mod numeric;
pub mod operating;
pub mod units;
pub mod valve;

// Re-exports: nice ergonomics for downstream crates
pub use design::{DesignField, EngineDesign, FieldOwner, SampleEngine};
pub use error::{PjError, PjResult};
pub use fuel::{FuelOverride, FuelProperties, FuelTable};
pub use geometry::GeometrySpec;
pub use numeric::*;
pub use operating::{FuelType, OperatingSpec};
pub use valve::{ValveSpec, ValveType};
