//! Fuel selection and ambient operating conditions.

use crate::numeric::{ensure_finite, ensure_positive};
use crate::units::{self, Pressure, Temperature};
use crate::{PjError, PjResult};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum FuelType {
    Gasoline,
    Propane,
    Hydrogen,
    Kerosene,
}

impl FuelType {
    pub const ALL: [FuelType; 4] = [
        FuelType::Gasoline,
        FuelType::Propane,
        FuelType::Hydrogen,
        FuelType::Kerosene,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "Gasoline",
            FuelType::Propane => "Propane",
            FuelType::Hydrogen => "Hydrogen",
            FuelType::Kerosene => "Kerosene",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for FuelType {
    type Err = PjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GASOLINE" | "PETROL" => Ok(FuelType::Gasoline),
            "PROPANE" | "C3H8" | "LPG" => Ok(FuelType::Propane),
            "HYDROGEN" | "H2" => Ok(FuelType::Hydrogen),
            "KEROSENE" | "JET-A" | "PARAFFIN" => Ok(FuelType::Kerosene),
            _ => Err(PjError::UnknownVariant {
                kind: "fuel type",
                name: s.to_string(),
            }),
        }
    }
}

/// Fuel, mixture and ambient state the engine runs in.
///
/// Pressure is kPa, temperature is degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperatingSpec {
    fuel_type: FuelType,
    air_fuel_ratio: f64,
    ambient_pressure: f64,
    ambient_temp: f64,
}

impl OperatingSpec {
    pub fn new(
        fuel_type: FuelType,
        air_fuel_ratio: f64,
        ambient_pressure: f64,
        ambient_temp: f64,
    ) -> PjResult<Self> {
        let air_fuel_ratio = ensure_positive(air_fuel_ratio, "air_fuel_ratio")?;
        let ambient_pressure = ensure_positive(ambient_pressure, "ambient_pressure")?;
        let ambient_temp = ensure_finite(ambient_temp, "ambient_temp")?;
        ensure_positive(units::celsius(ambient_temp).value, "ambient_temp (absolute)")?;
        Ok(Self {
            fuel_type,
            air_fuel_ratio,
            ambient_pressure,
            ambient_temp,
        })
    }

    pub(crate) const fn from_trusted(
        fuel_type: FuelType,
        air_fuel_ratio: f64,
        ambient_pressure: f64,
        ambient_temp: f64,
    ) -> Self {
        Self {
            fuel_type,
            air_fuel_ratio,
            ambient_pressure,
            ambient_temp,
        }
    }

    pub fn fuel_type(&self) -> FuelType {
        self.fuel_type
    }

    pub fn air_fuel_ratio(&self) -> f64 {
        self.air_fuel_ratio
    }

    /// Ambient pressure [kPa]
    pub fn ambient_pressure(&self) -> f64 {
        self.ambient_pressure
    }

    /// Ambient temperature [degC]
    pub fn ambient_temp(&self) -> f64 {
        self.ambient_temp
    }

    pub fn pressure(&self) -> Pressure {
        units::kpa(self.ambient_pressure)
    }

    pub fn temperature(&self) -> Temperature {
        units::celsius(self.ambient_temp)
    }

    pub fn ambient_kelvin(&self) -> f64 {
        self.temperature().value
    }
}
