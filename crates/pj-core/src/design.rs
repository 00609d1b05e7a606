//! The geometry/valve/operating triple and field-level perturbation.

use crate::geometry::GeometrySpec;
use crate::operating::{FuelType, OperatingSpec};
use crate::valve::{ValveSpec, ValveType};
use crate::{PjError, PjResult};
use serde::Serialize;
use std::fmt;

/// Which entity of the triple owns a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOwner {
    Geometry,
    Valves,
    Operating,
}

/// Numeric design input that can be swept, searched or perturbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "&'static str")]
pub enum DesignField {
    ChamberLength,
    ChamberDiameter,
    IntakeDiameter,
    ExhaustDiameter,
    ExhaustLength,
    ValveCount,
    ValveArea,
    AirFuelRatio,
    AmbientPressure,
    AmbientTemp,
}

impl DesignField {
    pub const ALL: [DesignField; 10] = [
        DesignField::ChamberLength,
        DesignField::ChamberDiameter,
        DesignField::IntakeDiameter,
        DesignField::ExhaustDiameter,
        DesignField::ExhaustLength,
        DesignField::ValveCount,
        DesignField::ValveArea,
        DesignField::AirFuelRatio,
        DesignField::AmbientPressure,
        DesignField::AmbientTemp,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DesignField::ChamberLength => "combustion_chamber_length",
            DesignField::ChamberDiameter => "combustion_chamber_diameter",
            DesignField::IntakeDiameter => "intake_diameter",
            DesignField::ExhaustDiameter => "exhaust_diameter",
            DesignField::ExhaustLength => "exhaust_length",
            DesignField::ValveCount => "num_valves",
            DesignField::ValveArea => "valve_area",
            DesignField::AirFuelRatio => "air_fuel_ratio",
            DesignField::AmbientPressure => "ambient_pressure",
            DesignField::AmbientTemp => "ambient_temp",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            DesignField::ChamberLength
            | DesignField::ChamberDiameter
            | DesignField::IntakeDiameter
            | DesignField::ExhaustDiameter
            | DesignField::ExhaustLength => "cm",
            DesignField::ValveArea => "cm²",
            DesignField::ValveCount | DesignField::AirFuelRatio => "",
            DesignField::AmbientPressure => "kPa",
            DesignField::AmbientTemp => "°C",
        }
    }

    pub fn owner(&self) -> FieldOwner {
        match self {
            DesignField::ChamberLength
            | DesignField::ChamberDiameter
            | DesignField::IntakeDiameter
            | DesignField::ExhaustDiameter
            | DesignField::ExhaustLength => FieldOwner::Geometry,
            DesignField::ValveCount | DesignField::ValveArea => FieldOwner::Valves,
            DesignField::AirFuelRatio
            | DesignField::AmbientPressure
            | DesignField::AmbientTemp => FieldOwner::Operating,
        }
    }
}

impl From<DesignField> for &'static str {
    fn from(field: DesignField) -> Self {
        field.key()
    }
}

impl fmt::Display for DesignField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for DesignField {
    type Err = PjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "combustion_chamber_length" | "chamber_length" => Ok(DesignField::ChamberLength),
            "combustion_chamber_diameter" | "chamber_diameter" => {
                Ok(DesignField::ChamberDiameter)
            }
            "intake_diameter" => Ok(DesignField::IntakeDiameter),
            "exhaust_diameter" => Ok(DesignField::ExhaustDiameter),
            "exhaust_length" => Ok(DesignField::ExhaustLength),
            "num_valves" | "valve_count" => Ok(DesignField::ValveCount),
            "valve_area" => Ok(DesignField::ValveArea),
            "air_fuel_ratio" | "afr" => Ok(DesignField::AirFuelRatio),
            "ambient_pressure" => Ok(DesignField::AmbientPressure),
            "ambient_temp" | "ambient_temperature" => Ok(DesignField::AmbientTemp),
            _ => Err(PjError::UnknownField {
                name: s.to_string(),
            }),
        }
    }
}

/// Complete engine definition handed to the model and validators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineDesign {
    pub geometry: GeometrySpec,
    pub valves: ValveSpec,
    pub operating: OperatingSpec,
}

impl EngineDesign {
    pub fn new(geometry: GeometrySpec, valves: ValveSpec, operating: OperatingSpec) -> Self {
        Self {
            geometry,
            valves,
            operating,
        }
    }

    pub fn field_value(&self, field: DesignField) -> f64 {
        let g = &self.geometry;
        match field {
            DesignField::ChamberLength => g.combustion_chamber_length(),
            DesignField::ChamberDiameter => g.combustion_chamber_diameter(),
            DesignField::IntakeDiameter => g.intake_diameter(),
            DesignField::ExhaustDiameter => g.exhaust_diameter(),
            DesignField::ExhaustLength => g.exhaust_length(),
            DesignField::ValveCount => f64::from(self.valves.num_valves()),
            DesignField::ValveArea => self.valves.valve_area(),
            DesignField::AirFuelRatio => self.operating.air_fuel_ratio(),
            DesignField::AmbientPressure => self.operating.ambient_pressure(),
            DesignField::AmbientTemp => self.operating.ambient_temp(),
        }
    }

    /// New design with one field replaced. The receiver is left untouched.
    ///
    /// Valve count is rounded to the nearest integer and must stay >= 1.
    pub fn with_field(&self, field: DesignField, value: f64) -> PjResult<Self> {
        let mut next = *self;
        match field.owner() {
            FieldOwner::Geometry => {
                let g = &self.geometry;
                let mut dims = [
                    g.combustion_chamber_length(),
                    g.combustion_chamber_diameter(),
                    g.intake_diameter(),
                    g.exhaust_diameter(),
                    g.exhaust_length(),
                ];
                dims[field as usize] = value;
                next.geometry = GeometrySpec::new(dims[0], dims[1], dims[2], dims[3], dims[4])?;
            }
            FieldOwner::Valves => {
                let v = &self.valves;
                next.valves = if field == DesignField::ValveCount {
                    ValveSpec::new(v.valve_type(), round_count(value)?, v.valve_area())?
                } else {
                    ValveSpec::new(v.valve_type(), v.num_valves(), value)?
                };
            }
            FieldOwner::Operating => {
                let o = &self.operating;
                let (mut afr, mut pressure, mut temp) =
                    (o.air_fuel_ratio(), o.ambient_pressure(), o.ambient_temp());
                match field {
                    DesignField::AirFuelRatio => afr = value,
                    DesignField::AmbientPressure => pressure = value,
                    _ => temp = value,
                }
                next.operating = OperatingSpec::new(o.fuel_type(), afr, pressure, temp)?;
            }
        }
        Ok(next)
    }

    pub fn sample(size: SampleEngine) -> Self {
        size.design()
    }
}

fn round_count(value: f64) -> PjResult<u32> {
    if !value.is_finite() {
        return Err(PjError::NonFinite {
            what: "num_valves",
            value,
        });
    }
    let rounded = value.round();
    if rounded < 1.0 || rounded > f64::from(u32::MAX) {
        return Err(PjError::NonPositive {
            what: "num_valves",
            value: rounded,
        });
    }
    Ok(rounded as u32)
}

/// Reference engines spanning the hobby size range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEngine {
    Small,
    Medium,
    Large,
}

impl SampleEngine {
    pub const ALL: [SampleEngine; 3] = [SampleEngine::Small, SampleEngine::Medium, SampleEngine::Large];

    pub fn key(&self) -> &'static str {
        match self {
            SampleEngine::Small => "small",
            SampleEngine::Medium => "medium",
            SampleEngine::Large => "large",
        }
    }

    fn dimensions(&self) -> ([f64; 5], u32, f64) {
        match self {
            SampleEngine::Small => ([30.0, 8.0, 4.0, 5.0, 40.0], 2, 8.0),
            SampleEngine::Medium => ([50.0, 15.0, 8.0, 10.0, 80.0], 4, 20.0),
            SampleEngine::Large => ([80.0, 25.0, 12.0, 16.0, 120.0], 8, 40.0),
        }
    }

    pub fn design(&self) -> EngineDesign {
        let (dims, count, area) = self.dimensions();
        EngineDesign::new(
            GeometrySpec::from_trusted(dims),
            ValveSpec::from_trusted(ValveType::Reed, count, area),
            OperatingSpec::from_trusted(FuelType::Gasoline, 14.7, 101.3, 20.0),
        )
    }
}

impl std::str::FromStr for SampleEngine {
    type Err = PjError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(SampleEngine::Small),
            "medium" => Ok(SampleEngine::Medium),
            "large" => Ok(SampleEngine::Large),
            _ => Err(PjError::UnknownVariant {
                kind: "sample engine",
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip_through_parse() {
        for field in DesignField::ALL {
            assert_eq!(field.key().parse::<DesignField>().unwrap(), field);
        }
        assert_eq!("afr".parse::<DesignField>().unwrap(), DesignField::AirFuelRatio);
        assert_eq!(
            "chamber_diameter".parse::<DesignField>().unwrap(),
            DesignField::ChamberDiameter
        );
    }

    #[test]
    fn unknown_field_is_an_error() {
        let err = "nozzle_angle".parse::<DesignField>().unwrap_err();
        assert_eq!(
            err,
            PjError::UnknownField {
                name: "nozzle_angle".to_string()
            }
        );
    }

    #[test]
    fn with_field_returns_new_design_and_keeps_baseline() {
        let base = SampleEngine::Medium.design();
        for field in DesignField::ALL {
            let target = base.field_value(field) + 1.0;
            let next = base.with_field(field, target).unwrap();
            assert!((next.field_value(field) - target).abs() < 1e-12, "{field}");
            for other in DesignField::ALL.into_iter().filter(|f| *f != field) {
                assert_eq!(next.field_value(other), base.field_value(other));
            }
        }
        assert_eq!(base, SampleEngine::Medium.design());
    }

    #[test]
    fn valve_count_is_rounded() {
        let base = SampleEngine::Medium.design();
        let next = base.with_field(DesignField::ValveCount, 5.6).unwrap();
        assert_eq!(next.valves.num_valves(), 6);
        assert!(base.with_field(DesignField::ValveCount, 0.4).is_err());
    }

    #[test]
    fn with_field_rejects_invalid_values() {
        let base = SampleEngine::Small.design();
        assert!(base.with_field(DesignField::ExhaustLength, -10.0).is_err());
        assert!(base.with_field(DesignField::AirFuelRatio, 0.0).is_err());
        assert!(base.with_field(DesignField::AmbientTemp, -20.0).is_ok());
    }

    #[test]
    fn sample_engines_pass_constructor_checks() {
        for size in SampleEngine::ALL {
            let d = size.design();
            let g = &d.geometry;
            assert!(
                GeometrySpec::new(
                    g.combustion_chamber_length(),
                    g.combustion_chamber_diameter(),
                    g.intake_diameter(),
                    g.exhaust_diameter(),
                    g.exhaust_length()
                )
                .is_ok()
            );
            assert!(ValveSpec::new(d.valves.valve_type(), d.valves.num_valves(), d.valves.valve_area()).is_ok());
            assert_eq!(size.key().parse::<SampleEngine>().unwrap(), size);
        }
    }

    #[test]
    fn owners_partition_fields() {
        let geometry = DesignField::ALL
            .iter()
            .filter(|f| f.owner() == FieldOwner::Geometry)
            .count();
        assert_eq!(geometry, 5);
        assert_eq!(DesignField::ValveArea.owner(), FieldOwner::Valves);
        assert_eq!(DesignField::AmbientTemp.owner(), FieldOwner::Operating);
    }
}
