//! Loosely typed design parameters.
//!
//! Validation runs on these rather than on the checked `pj-core` specs so
//! that out-of-range or unknown values can be reported instead of rejected
//! at construction.

use pj_core::{
    EngineDesign, FuelType, GeometrySpec, OperatingSpec, PjError, PjResult, ValveSpec, ValveType,
};
use serde::{Deserialize, Serialize};

/// Lengths in cm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryParams {
    pub combustion_chamber_length: f64,
    pub combustion_chamber_diameter: f64,
    pub intake_diameter: f64,
    pub exhaust_diameter: f64,
    pub exhaust_length: f64,
}

impl GeometryParams {
    pub fn chamber_volume_liters(&self) -> f64 {
        let r = self.combustion_chamber_diameter / 2.0;
        std::f64::consts::PI * r * r * self.combustion_chamber_length / 1000.0
    }

    pub fn intake_area_cm2(&self) -> f64 {
        circle_area(self.intake_diameter)
    }

    pub fn exhaust_area_cm2(&self) -> f64 {
        circle_area(self.exhaust_diameter)
    }
}

fn circle_area(d: f64) -> f64 {
    std::f64::consts::PI * (d / 2.0).powi(2)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValveParams {
    pub valve_type: String,
    pub num_valves: i64,
    /// Total area, cm²
    pub valve_area: f64,
}

impl ValveParams {
    pub fn parsed_type(&self) -> Option<ValveType> {
        self.valve_type.parse().ok()
    }

    /// Total area over count; 0 when the count is not positive.
    pub fn area_per_valve(&self) -> f64 {
        if self.num_valves > 0 {
            self.valve_area / self.num_valves as f64
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatingParams {
    pub fuel_type: String,
    pub air_fuel_ratio: f64,
    /// kPa
    pub ambient_pressure: f64,
    /// °C
    pub ambient_temp: f64,
}

impl OperatingParams {
    pub fn parsed_fuel(&self) -> Option<FuelType> {
        self.fuel_type.parse().ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DesignParams {
    pub geometry: GeometryParams,
    pub valves: ValveParams,
    pub operating: OperatingParams,
}

impl DesignParams {
    /// Build the checked design triple.
    pub fn to_design(&self) -> PjResult<EngineDesign> {
        let g = &self.geometry;
        let geometry = GeometrySpec::new(
            g.combustion_chamber_length,
            g.combustion_chamber_diameter,
            g.intake_diameter,
            g.exhaust_diameter,
            g.exhaust_length,
        )?;

        let valve_type: ValveType = self.valves.valve_type.parse()?;
        let count = u32::try_from(self.valves.num_valves).map_err(|_| PjError::NonPositive {
            what: "num_valves",
            value: self.valves.num_valves as f64,
        })?;
        let valves = ValveSpec::new(valve_type, count, self.valves.valve_area)?;

        let op = &self.operating;
        let fuel: FuelType = op.fuel_type.parse()?;
        let operating =
            OperatingSpec::new(fuel, op.air_fuel_ratio, op.ambient_pressure, op.ambient_temp)?;

        Ok(EngineDesign::new(geometry, valves, operating))
    }
}

impl From<&EngineDesign> for DesignParams {
    fn from(design: &EngineDesign) -> Self {
        let g = &design.geometry;
        let v = &design.valves;
        let op = &design.operating;
        Self {
            geometry: GeometryParams {
                combustion_chamber_length: g.combustion_chamber_length(),
                combustion_chamber_diameter: g.combustion_chamber_diameter(),
                intake_diameter: g.intake_diameter(),
                exhaust_diameter: g.exhaust_diameter(),
                exhaust_length: g.exhaust_length(),
            },
            valves: ValveParams {
                valve_type: v.valve_type().label().to_string(),
                num_valves: i64::from(v.num_valves()),
                valve_area: v.valve_area(),
            },
            operating: OperatingParams {
                fuel_type: op.fuel_type().key().to_string(),
                air_fuel_ratio: op.air_fuel_ratio(),
                ambient_pressure: op.ambient_pressure(),
                ambient_temp: op.ambient_temp(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pj_core::SampleEngine;

    #[test]
    fn sample_round_trips_through_params() {
        for size in SampleEngine::ALL {
            let design = size.design();
            let params = DesignParams::from(&design);
            assert_eq!(params.to_design().unwrap(), design);
        }
    }

    #[test]
    fn zero_count_fails_conversion() {
        let mut params = DesignParams::from(&SampleEngine::Medium.design());
        params.valves.num_valves = 0;
        assert!(params.to_design().is_err());
        params.valves.num_valves = -3;
        assert!(matches!(
            params.to_design(),
            Err(PjError::NonPositive { what: "num_valves", .. })
        ));
    }

    #[test]
    fn derived_areas() {
        let params = DesignParams::from(&SampleEngine::Medium.design());
        assert!((params.geometry.intake_area_cm2() - 50.265).abs() < 1e-3);
        assert_eq!(params.valves.area_per_valve(), 5.0);
    }
}
