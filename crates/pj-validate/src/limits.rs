//! Static per-tier validation bounds.

use pj_core::{DesignField, FuelType, PjError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Validation strictness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Strict,
    #[default]
    Normal,
    Permissive,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Strict, Tier::Normal, Tier::Permissive];

    pub fn key(&self) -> &'static str {
        match self {
            Tier::Strict => "strict",
            Tier::Normal => "normal",
            Tier::Permissive => "permissive",
        }
    }

    pub fn limits(&self) -> &'static TierLimits {
        match self {
            Tier::Strict => &STRICT,
            Tier::Normal => &NORMAL,
            Tier::Permissive => &PERMISSIVE,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Tier {
    type Err = PjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(Tier::Strict),
            "normal" => Ok(Tier::Normal),
            "permissive" | "lenient" => Ok(Tier::Permissive),
            _ => Err(PjError::UnknownVariant {
                kind: "validation tier",
                name: s.to_string(),
            }),
        }
    }
}

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeometryLimits {
    pub combustion_chamber_length: Bounds,
    pub combustion_chamber_diameter: Bounds,
    pub intake_diameter: Bounds,
    pub exhaust_diameter: Bounds,
    pub exhaust_length: Bounds,
    pub ld_ratio: Bounds,
    pub area_ratio: Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValveLimits {
    pub num_valves: Bounds,
    pub valve_area: Bounds,
    pub valve_to_intake_ratio: Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperatingLimits {
    /// kPa
    pub ambient_pressure: Bounds,
    /// °C
    pub ambient_temp: Bounds,
    /// Allowed fractional deviation of AFR from stoichiometric
    pub afr_tolerance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierLimits {
    pub geometry: GeometryLimits,
    pub valves: ValveLimits,
    pub operating: OperatingLimits,
}

impl TierLimits {
    /// Range for a design field; `None` for fields checked by other rules (AFR).
    pub fn bounds_for(&self, field: DesignField) -> Option<Bounds> {
        let g = &self.geometry;
        match field {
            DesignField::ChamberLength => Some(g.combustion_chamber_length),
            DesignField::ChamberDiameter => Some(g.combustion_chamber_diameter),
            DesignField::IntakeDiameter => Some(g.intake_diameter),
            DesignField::ExhaustDiameter => Some(g.exhaust_diameter),
            DesignField::ExhaustLength => Some(g.exhaust_length),
            DesignField::ValveCount => Some(self.valves.num_valves),
            DesignField::ValveArea => Some(self.valves.valve_area),
            DesignField::AirFuelRatio => None,
            DesignField::AmbientPressure => Some(self.operating.ambient_pressure),
            DesignField::AmbientTemp => Some(self.operating.ambient_temp),
        }
    }
}

pub static STRICT: TierLimits = TierLimits {
    geometry: GeometryLimits {
        combustion_chamber_length: Bounds::new(15.0, 80.0),
        combustion_chamber_diameter: Bounds::new(8.0, 25.0),
        intake_diameter: Bounds::new(3.0, 12.0),
        exhaust_diameter: Bounds::new(4.0, 18.0),
        exhaust_length: Bounds::new(30.0, 150.0),
        ld_ratio: Bounds::new(2.0, 5.0),
        area_ratio: Bounds::new(1.0, 3.0),
    },
    valves: ValveLimits {
        num_valves: Bounds::new(2.0, 8.0),
        valve_area: Bounds::new(8.0, 40.0),
        valve_to_intake_ratio: Bounds::new(0.6, 1.5),
    },
    operating: OperatingLimits {
        ambient_pressure: Bounds::new(95.0, 110.0),
        ambient_temp: Bounds::new(0.0, 40.0),
        afr_tolerance: 0.2,
    },
};

pub static NORMAL: TierLimits = TierLimits {
    geometry: GeometryLimits {
        combustion_chamber_length: Bounds::new(10.0, 100.0),
        combustion_chamber_diameter: Bounds::new(5.0, 30.0),
        intake_diameter: Bounds::new(2.0, 15.0),
        exhaust_diameter: Bounds::new(3.0, 20.0),
        exhaust_length: Bounds::new(20.0, 200.0),
        ld_ratio: Bounds::new(1.5, 6.0),
        area_ratio: Bounds::new(0.8, 4.0),
    },
    valves: ValveLimits {
        num_valves: Bounds::new(1.0, 12.0),
        valve_area: Bounds::new(5.0, 50.0),
        valve_to_intake_ratio: Bounds::new(0.3, 2.0),
    },
    operating: OperatingLimits {
        ambient_pressure: Bounds::new(80.0, 120.0),
        ambient_temp: Bounds::new(-20.0, 50.0),
        afr_tolerance: 0.3,
    },
};

pub static PERMISSIVE: TierLimits = TierLimits {
    geometry: GeometryLimits {
        combustion_chamber_length: Bounds::new(5.0, 200.0),
        combustion_chamber_diameter: Bounds::new(3.0, 50.0),
        intake_diameter: Bounds::new(1.0, 25.0),
        exhaust_diameter: Bounds::new(2.0, 40.0),
        exhaust_length: Bounds::new(10.0, 300.0),
        ld_ratio: Bounds::new(0.5, 10.0),
        area_ratio: Bounds::new(0.3, 8.0),
    },
    valves: ValveLimits {
        num_valves: Bounds::new(1.0, 20.0),
        valve_area: Bounds::new(2.0, 100.0),
        valve_to_intake_ratio: Bounds::new(0.2, 4.0),
    },
    operating: OperatingLimits {
        ambient_pressure: Bounds::new(50.0, 150.0),
        ambient_temp: Bounds::new(-50.0, 80.0),
        afr_tolerance: 0.5,
    },
};

pub fn validation_limits(tier: Tier) -> &'static TierLimits {
    tier.limits()
}

/// Hard AFR flammability window, if the fuel has one.
pub fn combustible_limits(fuel: FuelType) -> Option<Bounds> {
    match fuel {
        FuelType::Gasoline => Some(Bounds::new(8.0, 25.0)),
        FuelType::Propane => Some(Bounds::new(10.0, 30.0)),
        FuelType::Hydrogen => Some(Bounds::new(15.0, 100.0)),
        FuelType::Kerosene => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_nest_from_strict_to_permissive() {
        for field in DesignField::ALL {
            let bounds: Vec<_> = Tier::ALL
                .iter()
                .filter_map(|t| t.limits().bounds_for(field))
                .collect();
            if bounds.is_empty() {
                continue;
            }
            for pair in bounds.windows(2) {
                assert!(pair[1].min <= pair[0].min, "{field} min");
                assert!(pair[1].max >= pair[0].max, "{field} max");
            }
        }
    }

    #[test]
    fn afr_has_no_range_bounds() {
        assert!(NORMAL.bounds_for(DesignField::AirFuelRatio).is_none());
        assert_eq!(
            NORMAL.bounds_for(DesignField::ValveCount),
            Some(Bounds::new(1.0, 12.0))
        );
    }

    #[test]
    fn tier_parsing() {
        assert_eq!("Strict".parse::<Tier>().unwrap(), Tier::Strict);
        assert_eq!(Tier::default(), Tier::Normal);
        assert!("extreme".parse::<Tier>().is_err());
    }

    #[test]
    fn kerosene_has_no_combustible_window() {
        assert!(combustible_limits(FuelType::Kerosene).is_none());
        assert!(combustible_limits(FuelType::Hydrogen).unwrap().contains(34.3));
    }
}
