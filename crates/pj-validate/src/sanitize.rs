//! Coercion of free-form input into [`DesignParams`].
//!
//! Values may be numbers, plain numeric strings or unit-suffixed strings
//! (`"50 cm"`, `"14.7 psia"`, `"68F"`). Anything that cannot be coerced falls
//! back to zero (or an empty string) and is reported as a critical finding.

use crate::params::{DesignParams, GeometryParams, OperatingParams, ValveParams};
use crate::result::ValidationResult;
use pj_core::DesignField;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uom::si::f64::{Area, Length, Pressure, ThermodynamicTemperature};

/// A single unvalidated input value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawGeometry {
    #[serde(alias = "chamber_length")]
    pub combustion_chamber_length: RawValue,
    #[serde(alias = "chamber_diameter")]
    pub combustion_chamber_diameter: RawValue,
    pub intake_diameter: RawValue,
    pub exhaust_diameter: RawValue,
    pub exhaust_length: RawValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawValves {
    #[serde(alias = "type")]
    pub valve_type: RawValue,
    #[serde(alias = "valve_count")]
    pub num_valves: RawValue,
    pub valve_area: RawValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawOperating {
    #[serde(alias = "fuel")]
    pub fuel_type: RawValue,
    #[serde(alias = "afr")]
    pub air_fuel_ratio: RawValue,
    pub ambient_pressure: RawValue,
    #[serde(alias = "ambient_temperature")]
    pub ambient_temp: RawValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDesign {
    pub geometry: RawGeometry,
    pub valves: RawValves,
    pub operating: RawOperating,
}

impl From<&DesignParams> for RawDesign {
    fn from(p: &DesignParams) -> Self {
        let g = &p.geometry;
        let v = &p.valves;
        let op = &p.operating;
        Self {
            geometry: RawGeometry {
                combustion_chamber_length: g.combustion_chamber_length.into(),
                combustion_chamber_diameter: g.combustion_chamber_diameter.into(),
                intake_diameter: g.intake_diameter.into(),
                exhaust_diameter: g.exhaust_diameter.into(),
                exhaust_length: g.exhaust_length.into(),
            },
            valves: RawValves {
                valve_type: v.valve_type.as_str().into(),
                num_valves: (v.num_valves as f64).into(),
                valve_area: v.valve_area.into(),
            },
            operating: RawOperating {
                fuel_type: op.fuel_type.as_str().into(),
                air_fuel_ratio: op.air_fuel_ratio.into(),
                ambient_pressure: op.ambient_pressure.into(),
                ambient_temp: op.ambient_temp.into(),
            },
        }
    }
}

/// Physical quantity a raw value is read as. Bare numbers are taken in the
/// canonical unit: cm, cm², kPa, °C.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Length,
    Area,
    Pressure,
    Temperature,
    Dimensionless,
}

impl Quantity {
    fn name(&self) -> &'static str {
        match self {
            Quantity::Length => "length",
            Quantity::Area => "area",
            Quantity::Pressure => "pressure",
            Quantity::Temperature => "temperature",
            Quantity::Dimensionless => "dimensionless",
        }
    }

    fn of(field: DesignField) -> Self {
        match field {
            DesignField::ChamberLength
            | DesignField::ChamberDiameter
            | DesignField::IntakeDiameter
            | DesignField::ExhaustDiameter
            | DesignField::ExhaustLength => Quantity::Length,
            DesignField::ValveArea => Quantity::Area,
            DesignField::AmbientPressure => Quantity::Pressure,
            DesignField::AmbientTemp => Quantity::Temperature,
            DesignField::ValveCount | DesignField::AirFuelRatio => Quantity::Dimensionless,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("{field} is missing")]
    Missing { field: &'static str },

    #[error("{field}: could not parse a number from '{text}'")]
    Unparsable { field: &'static str, text: String },

    #[error("{field}: unknown {quantity} unit '{unit}'")]
    UnknownUnit {
        field: &'static str,
        quantity: &'static str,
        unit: String,
    },

    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}

/// Parse `"<number> [unit]"` into the canonical unit of `quantity`.
pub fn parse_quantity(
    field: &'static str,
    input: &str,
    quantity: Quantity,
) -> Result<f64, InputError> {
    let (value, unit) = split_value_and_unit(input).ok_or_else(|| InputError::Unparsable {
        field,
        text: input.to_string(),
    })?;
    convert(value, &unit, quantity).ok_or_else(|| InputError::UnknownUnit {
        field,
        quantity: quantity.name(),
        unit,
    })
}

fn convert(value: f64, unit: &str, quantity: Quantity) -> Option<f64> {
    use uom::si::{area, length, pressure, thermodynamic_temperature as temp};

    let unit = unit.to_lowercase().replace('²', "2").replace('^', "");
    let converted = match quantity {
        Quantity::Length => {
            let l = match unit.as_str() {
                "" | "cm" => return Some(value),
                "mm" => Length::new::<length::millimeter>(value),
                "m" => Length::new::<length::meter>(value),
                "in" | "inch" | "inches" => Length::new::<length::inch>(value),
                _ => return None,
            };
            l.get::<length::centimeter>()
        }
        Quantity::Area => {
            let a = match unit.as_str() {
                "" | "cm2" => return Some(value),
                "mm2" => Area::new::<area::square_millimeter>(value),
                "m2" => Area::new::<area::square_meter>(value),
                "in2" | "sq in" => Area::new::<area::square_inch>(value),
                _ => return None,
            };
            a.get::<area::square_centimeter>()
        }
        Quantity::Pressure => {
            let p = match unit.as_str() {
                "" | "kpa" => return Some(value),
                "pa" => Pressure::new::<pressure::pascal>(value),
                "bar" => Pressure::new::<pressure::bar>(value),
                "atm" => Pressure::new::<pressure::atmosphere>(value),
                "psi" | "psia" => Pressure::new::<pressure::pound_force_per_square_inch>(value),
                _ => return None,
            };
            p.get::<pressure::kilopascal>()
        }
        Quantity::Temperature => {
            let t = match unit.as_str() {
                "" | "c" | "°c" => return Some(value),
                "k" => ThermodynamicTemperature::new::<temp::kelvin>(value),
                "f" | "°f" => ThermodynamicTemperature::new::<temp::degree_fahrenheit>(value),
                _ => return None,
            };
            t.get::<temp::degree_celsius>()
        }
        Quantity::Dimensionless => match unit.as_str() {
            "" => value,
            _ => return None,
        },
    };
    Some(converted)
}

/// Split a value+unit string into (numeric_value, unit_string).
///
/// - "70F" -> (70.0, "F")
/// - "14.7 psia" -> (14.7, "psia")
/// - "300" -> (300.0, "")
fn split_value_and_unit(input: &str) -> Option<(f64, String)> {
    let trimmed = input.trim();
    let split_idx = trimmed
        .find(|c: char| !c.is_ascii_digit() && !matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        .unwrap_or(trimmed.len());

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let value: f64 = num_part.trim().parse().ok()?;
    Some((value, unit_part.trim().to_string()))
}

/// Collects coercion failures while filling a [`DesignParams`].
#[derive(Debug, Default)]
struct Sanitizer {
    issues: ValidationResult,
}

impl Sanitizer {
    fn reject<T>(&mut self, err: InputError, fallback: T) -> T {
        debug!(error = %err, "input coercion failed");
        self.issues.add_critical(err.to_string());
        fallback
    }

    fn number(&mut self, field: DesignField, raw: &RawValue) -> f64 {
        let key = field.key();
        let parsed = match raw {
            RawValue::Number(v) => Ok(*v),
            RawValue::Text(s) => parse_quantity(key, s, Quantity::of(field)),
            RawValue::Missing => Err(InputError::Missing { field: key }),
        };
        match parsed {
            Ok(v) if v.is_finite() => v,
            Ok(_) => self.reject(InputError::NonFinite { field: key }, 0.0),
            Err(err) => self.reject(err, 0.0),
        }
    }

    fn count(&mut self, field: DesignField, raw: &RawValue) -> i64 {
        let v = self.number(field, raw);
        // saturating float-to-int cast; non-finite input was already rejected
        v.trunc() as i64
    }

    fn text(&mut self, field: &'static str, raw: &RawValue) -> String {
        match raw {
            RawValue::Text(s) => s.trim().to_string(),
            RawValue::Number(v) => v.to_string(),
            RawValue::Missing => self.reject(InputError::Missing { field }, String::new()),
        }
    }
}

/// Coerce every field; failures are returned as critical findings.
pub fn sanitize(raw: &RawDesign) -> (DesignParams, ValidationResult) {
    let mut s = Sanitizer::default();
    let g = &raw.geometry;
    let v = &raw.valves;
    let op = &raw.operating;

    let geometry = GeometryParams {
        combustion_chamber_length: s.number(DesignField::ChamberLength, &g.combustion_chamber_length),
        combustion_chamber_diameter: s
            .number(DesignField::ChamberDiameter, &g.combustion_chamber_diameter),
        intake_diameter: s.number(DesignField::IntakeDiameter, &g.intake_diameter),
        exhaust_diameter: s.number(DesignField::ExhaustDiameter, &g.exhaust_diameter),
        exhaust_length: s.number(DesignField::ExhaustLength, &g.exhaust_length),
    };
    let valves = ValveParams {
        valve_type: s.text("valve_type", &v.valve_type),
        num_valves: s.count(DesignField::ValveCount, &v.num_valves),
        valve_area: s.number(DesignField::ValveArea, &v.valve_area),
    };
    let operating = OperatingParams {
        fuel_type: s.text("fuel_type", &op.fuel_type),
        air_fuel_ratio: s.number(DesignField::AirFuelRatio, &op.air_fuel_ratio),
        ambient_pressure: s.number(DesignField::AmbientPressure, &op.ambient_pressure),
        ambient_temp: s.number(DesignField::AmbientTemp, &op.ambient_temp),
    };

    (
        DesignParams {
            geometry,
            valves,
            operating,
        },
        s.issues,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6 * b.abs().max(1.0)
    }

    #[test]
    fn split_examples() {
        assert_eq!(split_value_and_unit("70F"), Some((70.0, "F".to_string())));
        assert_eq!(split_value_and_unit(" 14.7 psia "), Some((14.7, "psia".to_string())));
        assert_eq!(split_value_and_unit("300"), Some((300.0, String::new())));
        assert_eq!(split_value_and_unit("abc"), None);
    }

    #[test]
    fn length_units() {
        let f = "exhaust_length";
        assert!(close(parse_quantity(f, "800 mm", Quantity::Length).unwrap(), 80.0));
        assert!(close(parse_quantity(f, "0.8m", Quantity::Length).unwrap(), 80.0));
        assert!(close(parse_quantity(f, "2 in", Quantity::Length).unwrap(), 5.08));
        assert!(close(parse_quantity(f, "80", Quantity::Length).unwrap(), 80.0));
    }

    #[test]
    fn area_units_accept_superscript_and_caret() {
        let f = "valve_area";
        assert!(close(parse_quantity(f, "20 cm²", Quantity::Area).unwrap(), 20.0));
        assert!(close(parse_quantity(f, "2000 mm^2", Quantity::Area).unwrap(), 20.0));
        assert!(close(parse_quantity(f, "0.002 m2", Quantity::Area).unwrap(), 20.0));
        assert!(close(parse_quantity(f, "1 in2", Quantity::Area).unwrap(), 6.4516));
    }

    #[test]
    fn pressure_units() {
        let f = "ambient_pressure";
        assert!(close(parse_quantity(f, "1 atm", Quantity::Pressure).unwrap(), 101.325));
        assert!(close(parse_quantity(f, "1.013 bar", Quantity::Pressure).unwrap(), 101.3));
        assert!(close(parse_quantity(f, "101300 Pa", Quantity::Pressure).unwrap(), 101.3));
        let psi = parse_quantity(f, "14.7 psia", Quantity::Pressure).unwrap();
        assert!((psi - 101.35).abs() < 0.01);
    }

    #[test]
    fn temperature_units() {
        let f = "ambient_temp";
        assert!(close(parse_quantity(f, "20 °C", Quantity::Temperature).unwrap(), 20.0));
        assert!(close(parse_quantity(f, "293.15 K", Quantity::Temperature).unwrap(), 20.0));
        assert!(close(parse_quantity(f, "68F", Quantity::Temperature).unwrap(), 20.0));
    }

    #[test]
    fn unknown_unit_is_reported() {
        let err = parse_quantity("exhaust_length", "3 furlongs", Quantity::Length).unwrap_err();
        assert!(matches!(err, InputError::UnknownUnit { quantity: "length", .. }));
    }

    #[test]
    fn failures_fall_back_to_zero_with_critical_finding() {
        let mut raw = RawDesign::default();
        raw.geometry.combustion_chamber_length = "fifty".into();
        raw.valves.num_valves = 4.9.into();
        let (params, issues) = sanitize(&raw);

        assert_eq!(params.geometry.combustion_chamber_length, 0.0);
        assert_eq!(params.valves.num_valves, 4);
        assert_eq!(params.valves.valve_type, "");
        assert!(!issues.is_valid);
        assert!(issues.contains("combustion_chamber_length: could not parse"));
        assert!(issues.contains("valve_type is missing"));
        // every field except the count is missing or unparsable
        assert_eq!(issues.errors.len(), 11);
    }

    #[test]
    fn yaml_with_units_and_aliases() {
        let yaml = r#"
geometry:
  chamber_length: "500 mm"
  chamber_diameter: 15
  intake_diameter: "8cm"
  exhaust_diameter: 10
  exhaust_length: "0.8 m"
valves:
  type: Reed Valves
  valve_count: 4
  valve_area: "20 cm²"
operating:
  fuel: Gasoline
  afr: 14.7
  ambient_pressure: "1 atm"
  ambient_temperature: "68 F"
"#;
        let raw: RawDesign = serde_yaml::from_str(yaml).unwrap();
        let (params, issues) = sanitize(&raw);
        assert!(issues.is_empty(), "{issues}");
        assert!(close(params.geometry.combustion_chamber_length, 50.0));
        assert!(close(params.geometry.exhaust_length, 80.0));
        assert_eq!(params.valves.num_valves, 4);
        assert_eq!(params.valves.valve_type, "Reed Valves");
        assert!(close(params.operating.ambient_temp, 20.0));
        assert!(params.to_design().is_ok());
    }
}
