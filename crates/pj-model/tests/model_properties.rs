//! Model-level behavior: reference design, monotonicity, invariants.

use pj_core::{
    DesignField, EngineDesign, FuelTable, FuelType, GeometrySpec, OperatingSpec, SampleEngine,
    ValveSpec, ValveType,
};
use pj_model::{AnalysisStatus, ModelConstants, PerformanceModel};
use proptest::prelude::*;

fn reference_design() -> EngineDesign {
    EngineDesign::new(
        GeometrySpec::new(50.0, 15.0, 8.0, 10.0, 80.0).unwrap(),
        ValveSpec::new(ValveType::Reed, 4, 20.0).unwrap(),
        OperatingSpec::new(FuelType::Gasoline, 14.7, 101.3, 20.0).unwrap(),
    )
}

#[test]
fn reference_design_produces_positive_performance() {
    let model = PerformanceModel::default();
    let r = model.evaluate_design(&reference_design());

    assert_eq!(r.status, AnalysisStatus::Complete);
    assert!(r.thrust > 0.0, "thrust should be positive, got {}", r.thrust);
    assert!(r.frequency > 0.0);
    assert!(r.thermal_efficiency > 0.0 && r.thermal_efficiency < 100.0);
    assert!((r.thrust - 388.7).abs() < 1.0, "thrust = {}", r.thrust);
    assert!((r.frequency - 54.04).abs() < 0.05, "frequency = {}", r.frequency);
    assert!((r.combustion_volume - 8.836).abs() < 1e-3);
    assert!((r.fuel_consumption_rate - r.fuel_mass_flow * 3600.0).abs() < 1e-12);
}

#[test]
fn derived_weight_metrics_follow_heuristic() {
    let model = PerformanceModel::default();
    let r = model.evaluate_design(&reference_design());
    let weight = (5.0 * r.power).max(10.0);
    assert!((r.thrust_to_weight_ratio - r.thrust / (weight * 9.81)).abs() < 1e-9);
    assert!((r.power_to_weight_ratio - r.power / weight).abs() < 1e-12);
}

#[test]
fn frequency_decreases_with_exhaust_length() {
    let model = PerformanceModel::default();
    let base = reference_design();
    let freqs: Vec<f64> = [40.0, 60.0, 80.0, 120.0, 160.0]
        .iter()
        .map(|&len| {
            let d = base.with_field(DesignField::ExhaustLength, len).unwrap();
            model.evaluate_design(&d).frequency
        })
        .collect();

    for pair in freqs.windows(2) {
        assert!(pair[1] < pair[0], "frequency must strictly decrease: {freqs:?}");
    }
}

#[test]
fn evaluate_is_idempotent() {
    let model = PerformanceModel::default();
    let d = reference_design();
    let first = model.evaluate_design(&d);
    let second = model.evaluate_design(&d);
    assert_eq!(first, second);
    assert_eq!(d, reference_design());
}

#[test]
fn heating_value_override_changes_results() {
    let mut overrides = std::collections::BTreeMap::new();
    overrides.insert(
        "Gasoline".to_string(),
        pj_core::FuelOverride {
            heating_value: Some(30.0),
            density: Some(0.75),
            stoich_ratio: Some(14.7),
            molecular_weight: Some(100.0),
            ..Default::default()
        },
    );
    let custom =
        PerformanceModel::new(ModelConstants::default(), FuelTable::from_overrides(&overrides))
            .unwrap();
    let default = PerformanceModel::default();
    let d = reference_design();
    assert!(custom.evaluate_design(&d).thermal_efficiency > default.evaluate_design(&d).thermal_efficiency);
}

#[test]
fn sample_engines_scale_with_size() {
    let model = PerformanceModel::default();
    let small = model.evaluate_design(&SampleEngine::Small.design());
    let large = model.evaluate_design(&SampleEngine::Large.design());
    assert!(large.thrust > small.thrust);
    assert!(large.frequency < small.frequency);
}

fn design_strategy() -> impl Strategy<Value = EngineDesign> {
    (
        (10.0..150.0f64, 5.0..40.0f64, 0.1..1.0f64, 0.2..2.0f64, 10.0..300.0f64),
        (prop::sample::select(ValveType::ALL.to_vec()), 1u32..20, 1.0..100.0f64),
        (
            prop::sample::select(FuelType::ALL.to_vec()),
            2.0..60.0f64,
            40.0..160.0f64,
            -50.0..80.0f64,
        ),
    )
        .prop_map(|((len, dia, intake_frac, exhaust_frac, exh_len), (vt, n, area), (fuel, afr, p, t))| {
            let intake = dia * intake_frac;
            EngineDesign::new(
                GeometrySpec::new(len, dia, intake, intake * exhaust_frac, exh_len).unwrap(),
                ValveSpec::new(vt, n, area).unwrap(),
                OperatingSpec::new(fuel, afr, p, t).unwrap(),
            )
        })
}

proptest! {
    #[test]
    fn valid_designs_yield_physical_results(design in design_strategy()) {
        let model = PerformanceModel::default();
        let r = model.evaluate_design(&design);

        prop_assert_eq!(r.status, AnalysisStatus::Complete);
        prop_assert!(r.thrust >= 0.0);
        prop_assert!(r.air_mass_flow >= 0.0);
        prop_assert!(r.fuel_mass_flow >= 0.0);
        prop_assert!(r.frequency > 0.0);
        if r.fuel_mass_flow > 0.0 {
            prop_assert!(r.specific_fuel_consumption.is_finite());
        } else {
            prop_assert!(r.specific_fuel_consumption.is_infinite());
        }
    }

    #[test]
    fn evaluation_is_deterministic(design in design_strategy()) {
        let model = PerformanceModel::default();
        prop_assert_eq!(model.evaluate_design(&design), model.evaluate_design(&design));
    }
}
