// pj-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, AvailableEnergy as UomAvailableEnergy, Length as UomLength,
    Power as UomPower, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, Volume as UomVolume,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type SpecificEnergy = UomAvailableEnergy;
pub type Length = UomLength;
pub type Power = UomPower;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Volume = UomVolume;

#[inline]
pub fn cm(v: f64) -> Length {
    use uom::si::length::centimeter;
    Length::new::<centimeter>(v)
}

#[inline]
pub fn cm2(v: f64) -> Area {
    use uom::si::area::square_centimeter;
    Area::new::<square_centimeter>(v)
}

#[inline]
pub fn square_meters(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn cubic_meters(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn kpa(v: f64) -> Pressure {
    use uom::si::pressure::kilopascal;
    Pressure::new::<kilopascal>(v)
}

#[inline]
pub fn celsius(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn mj_per_kg(v: f64) -> SpecificEnergy {
    use uom::si::available_energy::megajoule_per_kilogram;
    SpecificEnergy::new::<megajoule_per_kilogram>(v)
}

#[inline]
pub fn watts(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

/// Readback helpers in the engineering units designs are specified in.
pub mod readback {
    use super::*;

    #[inline]
    pub fn in_cm2(a: Area) -> f64 {
        use uom::si::area::square_centimeter;
        a.get::<square_centimeter>()
    }

    #[inline]
    pub fn in_liters(v: Volume) -> f64 {
        use uom::si::volume::liter;
        v.get::<liter>()
    }

    #[inline]
    pub fn in_kw(p: Power) -> f64 {
        use uom::si::power::kilowatt;
        p.get::<kilowatt>()
    }
}

pub mod constants {
    /// Ambient pressure at sea level, kPa.
    pub const SEA_LEVEL_KPA: f64 = 101.325;
    /// ISA sea-level temperature, K.
    pub const ISA_SEA_LEVEL_K: f64 = 288.15;
    pub const SECONDS_PER_HOUR: f64 = 3600.0;
    /// Standard gravity, m/s^2.
    pub const STANDARD_GRAVITY: f64 = 9.81;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _l = cm(50.0);
        let _a = cm2(20.0);
        let _p = kpa(101.3);
        let _t = celsius(20.0);
        let _w = watts(1000.0);
    }

    #[test]
    fn engineering_units_convert_to_si() {
        assert!((cm(50.0).value - 0.5).abs() < 1e-12);
        assert!((cm2(20.0).value - 0.002).abs() < 1e-12);
        assert!((kpa(101.3).value - 101_300.0).abs() < 1e-9);
        assert!((celsius(20.0).value - 293.15).abs() < 1e-9);
        assert!((mj_per_kg(44.0).value - 44.0e6).abs() < 1e-3);
        assert!((readback::in_kw(watts(2500.0)) - 2.5).abs() < 1e-12);
    }
}
