//! Fuel property lookup.
//!
//! The performance model consumes a [`FuelTable`] injected at construction.
//! The table always holds an entry for every [`FuelType`]; overrides that are
//! missing or invalid fall back to the built-in defaults.

use crate::operating::FuelType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Thermochemical data for one fuel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelProperties {
    /// Lower heating value [MJ/kg]
    pub heating_value: f64,
    /// Liquid density [kg/L]
    pub density: f64,
    /// Stoichiometric air-fuel mass ratio
    pub stoich_ratio: f64,
    /// Molecular weight [g/mol]
    pub molecular_weight: f64,
    /// Autoignition temperature [degC]
    pub autoignition_temp: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flash_point: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boiling_point: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub octane_rating: Option<f64>,
    /// Vapor pressure at 20 degC [kPa]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vapor_pressure: Option<f64>,
}

impl FuelProperties {
    pub fn default_for(fuel: FuelType) -> Self {
        match fuel {
            FuelType::Gasoline => Self {
                heating_value: 44.0,
                density: 0.75,
                stoich_ratio: 14.7,
                molecular_weight: 100.0,
                autoignition_temp: 280.0,
                flash_point: Some(-43.0),
                boiling_point: Some(38.0),
                octane_rating: Some(87.0),
                vapor_pressure: Some(45.0),
            },
            FuelType::Propane => Self {
                heating_value: 46.4,
                density: 0.51,
                stoich_ratio: 15.7,
                molecular_weight: 44.0,
                autoignition_temp: 470.0,
                flash_point: Some(-104.0),
                boiling_point: Some(-42.0),
                octane_rating: Some(112.0),
                vapor_pressure: Some(853.0),
            },
            FuelType::Hydrogen => Self {
                heating_value: 120.0,
                density: 0.0899,
                stoich_ratio: 34.3,
                molecular_weight: 2.0,
                autoignition_temp: 500.0,
                flash_point: Some(-253.0),
                boiling_point: Some(-253.0),
                octane_rating: Some(130.0),
                vapor_pressure: Some(101_325.0),
            },
            FuelType::Kerosene => Self {
                heating_value: 43.2,
                density: 0.82,
                stoich_ratio: 15.0,
                molecular_weight: 170.0,
                autoignition_temp: 210.0,
                flash_point: Some(38.0),
                boiling_point: Some(150.0),
                octane_rating: Some(50.0),
                vapor_pressure: Some(0.2),
            },
        }
    }

    /// Required fields must be positive and finite for the entry to be usable.
    pub fn is_usable(&self) -> bool {
        [
            self.heating_value,
            self.density,
            self.stoich_ratio,
            self.molecular_weight,
        ]
        .iter()
        .all(|v| v.is_finite() && *v > 0.0)
            && self.autoignition_temp.is_finite()
    }
}

/// Partially specified fuel entry as read from configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FuelOverride {
    pub heating_value: Option<f64>,
    pub density: Option<f64>,
    pub stoich_ratio: Option<f64>,
    pub molecular_weight: Option<f64>,
    pub autoignition_temp: Option<f64>,
    pub flash_point: Option<f64>,
    pub boiling_point: Option<f64>,
    pub octane_rating: Option<f64>,
    pub vapor_pressure: Option<f64>,
}

impl FuelOverride {
    /// Complete entry, or `None` when a required field is missing or invalid.
    fn resolve(&self, fallback: &FuelProperties) -> Option<FuelProperties> {
        let props = FuelProperties {
            heating_value: self.heating_value?,
            density: self.density?,
            stoich_ratio: self.stoich_ratio?,
            molecular_weight: self.molecular_weight?,
            autoignition_temp: self.autoignition_temp.unwrap_or(fallback.autoignition_temp),
            flash_point: self.flash_point,
            boiling_point: self.boiling_point,
            octane_rating: self.octane_rating,
            vapor_pressure: self.vapor_pressure,
        };
        props.is_usable().then_some(props)
    }
}

/// Read-only fuel lookup with one entry per [`FuelType`].
#[derive(Debug, Clone, PartialEq)]
pub struct FuelTable {
    entries: [FuelProperties; 4],
}

impl Default for FuelTable {
    fn default() -> Self {
        Self {
            entries: FuelType::ALL.map(FuelProperties::default_for),
        }
    }
}

impl FuelTable {
    /// Apply configuration overrides keyed by fuel name.
    ///
    /// Unknown fuel names and unusable entries are logged and skipped.
    pub fn from_overrides(overrides: &BTreeMap<String, FuelOverride>) -> Self {
        let mut table = Self::default();
        for (name, entry) in overrides {
            let fuel = match name.parse::<FuelType>() {
                Ok(fuel) => fuel,
                Err(err) => {
                    warn!(%err, "ignoring fuel override");
                    continue;
                }
            };
            let slot = &mut table.entries[fuel as usize];
            match entry.resolve(slot) {
                Some(props) => *slot = props,
                None => warn!(
                    fuel = fuel.key(),
                    "fuel override is incomplete or invalid, keeping defaults"
                ),
            }
        }
        table
    }

    pub fn get(&self, fuel: FuelType) -> &FuelProperties {
        &self.entries[fuel as usize]
    }

    pub fn stoich_ratio(&self, fuel: FuelType) -> f64 {
        self.get(fuel).stoich_ratio
    }

    pub fn iter(&self) -> impl Iterator<Item = (FuelType, &FuelProperties)> + '_ {
        FuelType::ALL.into_iter().zip(self.entries.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_fuel() {
        let table = FuelTable::default();
        for (fuel, props) in table.iter() {
            assert!(props.is_usable(), "{fuel} default must be usable");
        }
        assert_eq!(table.stoich_ratio(FuelType::Gasoline), 14.7);
        assert_eq!(table.get(FuelType::Hydrogen).heating_value, 120.0);
    }

    #[test]
    fn valid_override_replaces_entry() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "propane".to_string(),
            FuelOverride {
                heating_value: Some(46.0),
                density: Some(0.5),
                stoich_ratio: Some(15.6),
                molecular_weight: Some(44.1),
                ..Default::default()
            },
        );
        let table = FuelTable::from_overrides(&overrides);
        let propane = table.get(FuelType::Propane);
        assert_eq!(propane.heating_value, 46.0);
        assert_eq!(propane.autoignition_temp, 470.0);
        assert_eq!(propane.flash_point, None);
    }

    #[test]
    fn invalid_override_falls_back_to_default() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "Gasoline".to_string(),
            FuelOverride {
                heating_value: Some(-1.0),
                density: Some(0.75),
                stoich_ratio: Some(14.7),
                molecular_weight: Some(100.0),
                ..Default::default()
            },
        );
        overrides.insert(
            "Kerosene".to_string(),
            FuelOverride {
                heating_value: Some(43.0),
                ..Default::default()
            },
        );
        overrides.insert("Unobtainium".to_string(), FuelOverride::default());

        let table = FuelTable::from_overrides(&overrides);
        assert_eq!(table, FuelTable::default());
    }
}
