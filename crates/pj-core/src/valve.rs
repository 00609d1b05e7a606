//! Intake valve definitions.

use crate::numeric::ensure_positive;
use crate::{PjError, PjResult};
use serde::Serialize;
use std::fmt;

/// Intake valve family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ValveType {
    /// Spring-steel reed petals
    Reed,
    /// Hinged flapper plates
    Flapper,
    /// Driven rotary disc
    Rotary,
}

impl ValveType {
    pub const ALL: [ValveType; 3] = [ValveType::Reed, ValveType::Flapper, ValveType::Rotary];

    pub fn key(&self) -> &'static str {
        match self {
            ValveType::Reed => "reed",
            ValveType::Flapper => "flapper",
            ValveType::Rotary => "rotary",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ValveType::Reed => "Reed Valves",
            ValveType::Flapper => "Flapper Valves",
            ValveType::Rotary => "Rotary Valves",
        }
    }
}

impl fmt::Display for ValveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for ValveType {
    type Err = PjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "REED" | "REEDS" | "REED VALVE" | "REED VALVES" => Ok(ValveType::Reed),
            "FLAPPER" | "FLAPPERS" | "FLAPPER VALVE" | "FLAPPER VALVES" => Ok(ValveType::Flapper),
            "ROTARY" | "ROTARY VALVE" | "ROTARY VALVES" => Ok(ValveType::Rotary),
            _ => Err(PjError::UnknownVariant {
                kind: "valve type",
                name: s.to_string(),
            }),
        }
    }
}

/// Intake valve bank: type, count and total flow area [cm^2].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValveSpec {
    valve_type: ValveType,
    num_valves: u32,
    valve_area: f64,
}

impl ValveSpec {
    pub fn new(valve_type: ValveType, num_valves: u32, valve_area: f64) -> PjResult<Self> {
        if num_valves == 0 {
            return Err(PjError::NonPositive {
                what: "num_valves",
                value: 0.0,
            });
        }
        Ok(Self {
            valve_type,
            num_valves,
            valve_area: ensure_positive(valve_area, "valve_area")?,
        })
    }

    pub(crate) const fn from_trusted(valve_type: ValveType, num_valves: u32, valve_area: f64) -> Self {
        Self {
            valve_type,
            num_valves,
            valve_area,
        }
    }

    pub fn valve_type(&self) -> ValveType {
        self.valve_type
    }

    pub fn num_valves(&self) -> u32 {
        self.num_valves
    }

    /// Total valve flow area [cm^2]
    pub fn valve_area(&self) -> f64 {
        self.valve_area
    }

    pub fn area_per_valve(&self) -> f64 {
        self.valve_area / f64::from(self.num_valves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_labels() {
        for vt in ValveType::ALL {
            assert_eq!(vt.key().parse::<ValveType>().unwrap(), vt);
            assert_eq!(vt.label().parse::<ValveType>().unwrap(), vt);
        }
        assert_eq!(" reed ".parse::<ValveType>().unwrap(), ValveType::Reed);
        assert_eq!(ValveType::Rotary.to_string(), "Rotary Valves");
        assert_eq!("Rotary Valve".parse::<ValveType>().unwrap(), ValveType::Rotary);
        assert!("poppet".parse::<ValveType>().is_err());
    }

    #[test]
    fn area_per_valve_divides_total() {
        let v = ValveSpec::new(ValveType::Reed, 4, 20.0).unwrap();
        assert!((v.area_per_valve() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_zero_count_and_area() {
        assert!(ValveSpec::new(ValveType::Reed, 0, 20.0).is_err());
        assert!(ValveSpec::new(ValveType::Flapper, 2, 0.0).is_err());
        assert!(ValveSpec::new(ValveType::Rotary, 1, f64::NAN).is_err());
    }
}
