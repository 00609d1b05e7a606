//! Combustion chamber and exhaust geometry.
//!
//! All inputs are centimeters. Derived quantities are computed on demand
//! through uom so the conversions to SI live in one place.

use crate::numeric::ensure_positive;
use crate::units::{self, Area, Length, Volume, readback};
use crate::PjResult;
use serde::Serialize;
use std::f64::consts::PI;

/// Immutable pulse-jet geometry. A modified geometry is a new instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeometrySpec {
    /// Combustion chamber length [cm]
    combustion_chamber_length: f64,
    /// Combustion chamber diameter [cm]
    combustion_chamber_diameter: f64,
    /// Intake diameter [cm]
    intake_diameter: f64,
    /// Exhaust (tailpipe) diameter [cm]
    exhaust_diameter: f64,
    /// Exhaust (tailpipe) length [cm]
    exhaust_length: f64,
}

impl GeometrySpec {
    pub fn new(
        combustion_chamber_length: f64,
        combustion_chamber_diameter: f64,
        intake_diameter: f64,
        exhaust_diameter: f64,
        exhaust_length: f64,
    ) -> PjResult<Self> {
        Ok(Self {
            combustion_chamber_length: ensure_positive(
                combustion_chamber_length,
                "combustion_chamber_length",
            )?,
            combustion_chamber_diameter: ensure_positive(
                combustion_chamber_diameter,
                "combustion_chamber_diameter",
            )?,
            intake_diameter: ensure_positive(intake_diameter, "intake_diameter")?,
            exhaust_diameter: ensure_positive(exhaust_diameter, "exhaust_diameter")?,
            exhaust_length: ensure_positive(exhaust_length, "exhaust_length")?,
        })
    }

    /// Built-in tables only; values must already satisfy the invariants.
    pub(crate) const fn from_trusted(dims: [f64; 5]) -> Self {
        Self {
            combustion_chamber_length: dims[0],
            combustion_chamber_diameter: dims[1],
            intake_diameter: dims[2],
            exhaust_diameter: dims[3],
            exhaust_length: dims[4],
        }
    }

    pub fn combustion_chamber_length(&self) -> f64 {
        self.combustion_chamber_length
    }

    pub fn combustion_chamber_diameter(&self) -> f64 {
        self.combustion_chamber_diameter
    }

    pub fn intake_diameter(&self) -> f64 {
        self.intake_diameter
    }

    pub fn exhaust_diameter(&self) -> f64 {
        self.exhaust_diameter
    }

    pub fn exhaust_length(&self) -> f64 {
        self.exhaust_length
    }

    pub fn chamber_length(&self) -> Length {
        units::cm(self.combustion_chamber_length)
    }

    pub fn chamber_radius(&self) -> Length {
        units::cm(self.combustion_chamber_diameter / 2.0)
    }

    /// Effective acoustic neck length with an end correction applied at both openings.
    pub fn neck_length(&self, end_correction: f64) -> Length {
        units::cm(
            self.exhaust_length + end_correction * (self.exhaust_diameter + self.intake_diameter),
        )
    }

    pub fn chamber_volume(&self) -> Volume {
        let r = self.chamber_radius().value;
        units::cubic_meters(PI * r * r * self.chamber_length().value)
    }

    pub fn intake_area(&self) -> Area {
        circle_area(self.intake_diameter)
    }

    pub fn exhaust_area(&self) -> Area {
        circle_area(self.exhaust_diameter)
    }

    /// Closed-cylinder internal surface (both end caps plus the wall).
    pub fn surface_area(&self) -> Area {
        let r = self.chamber_radius().value;
        let l = self.chamber_length().value;
        units::square_meters(2.0 * PI * r * r + 2.0 * PI * r * l)
    }

    pub fn chamber_volume_liters(&self) -> f64 {
        readback::in_liters(self.chamber_volume())
    }

    pub fn intake_area_cm2(&self) -> f64 {
        readback::in_cm2(self.intake_area())
    }

    pub fn exhaust_area_cm2(&self) -> f64 {
        readback::in_cm2(self.exhaust_area())
    }

    pub fn length_to_diameter_ratio(&self) -> f64 {
        self.combustion_chamber_length / self.combustion_chamber_diameter
    }

    /// Exhaust area / intake area.
    pub fn area_ratio(&self) -> f64 {
        self.exhaust_area().value / self.intake_area().value
    }

    /// Chamber volume [m^3] per internal surface [m^2], in meters.
    pub fn volume_to_surface_ratio(&self) -> f64 {
        let surface = self.surface_area().value;
        if surface > 0.0 {
            self.chamber_volume().value / surface
        } else {
            0.0
        }
    }
}

fn circle_area(diameter_cm: f64) -> Area {
    let r = units::cm(diameter_cm / 2.0).value;
    units::square_meters(PI * r * r)
}
