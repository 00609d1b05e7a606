//! End-to-end sweep, grid and sensitivity behavior on reference designs.

use pj_core::{
    DesignField, EngineDesign, FuelType, GeometrySpec, OperatingSpec, SampleEngine, ValveSpec,
    ValveType,
};
use pj_model::PerformanceModel;
use pj_optimize::{GridRange, Objective, OptimizeError, Optimizer, linspace};

fn reference_design() -> EngineDesign {
    EngineDesign::new(
        GeometrySpec::new(50.0, 15.0, 8.0, 10.0, 80.0).unwrap(),
        ValveSpec::new(ValveType::Reed, 4, 20.0).unwrap(),
        OperatingSpec::new(FuelType::Gasoline, 14.7, 101.3, 20.0).unwrap(),
    )
}

#[test]
fn afr_sweep_peaks_near_stoichiometric() {
    let model = PerformanceModel::default();
    let opt = Optimizer::new(&model);
    let values = linspace(10.0, 20.0, 20);

    let table = opt
        .sweep(&reference_design(), DesignField::AirFuelRatio, &values)
        .unwrap();

    assert_eq!(table.len(), 20);
    assert_eq!(table.num_failed, 0);
    let eff = &table.thermal_efficiency;
    let peak = table.argmax(eff).unwrap();
    assert!(
        (table.values[peak] - 14.7).abs() < 0.6,
        "peak at AFR {} ({eff:?})",
        table.values[peak]
    );
    for i in 0..peak {
        assert!(eff[i] < eff[i + 1], "efficiency must rise toward the peak");
    }
    for i in peak..eff.len() - 1 {
        assert!(eff[i] > eff[i + 1], "efficiency must fall after the peak");
    }
}

#[test]
fn two_field_grid_reports_true_maximum() {
    let model = PerformanceModel::default();
    let opt = Optimizer::new(&model);
    let ranges = [
        GridRange::new(DesignField::ExhaustLength, 40.0, 120.0),
        GridRange::new(DesignField::ChamberDiameter, 10.0, 20.0),
    ];

    let report = opt
        .grid_search(&reference_design(), &ranges, Objective::Thrust)
        .unwrap();

    assert_eq!(report.num_evaluated(), 25);
    let max = report
        .rows
        .iter()
        .map(|r| r.result.thrust)
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(report.best_value(), Some(max));
    let best = report.best_configuration().unwrap();
    let row = report.best().unwrap();
    assert_eq!(best.field_value(DesignField::ExhaustLength), row.values[0]);
    assert_eq!(best.field_value(DesignField::ChamberDiameter), row.values[1]);
}

#[test]
fn sfc_grid_reports_minimum() {
    let model = PerformanceModel::default();
    let opt = Optimizer::new(&model);
    let ranges = [
        GridRange::new(DesignField::AirFuelRatio, 12.0, 18.0),
        GridRange::new(DesignField::ValveArea, 10.0, 30.0),
    ];

    let report = opt
        .grid_search(&reference_design(), &ranges, Objective::SpecificFuelConsumption)
        .unwrap();

    assert_eq!(report.num_evaluated(), 25);
    let min = report
        .rows
        .iter()
        .map(|r| r.result.specific_fuel_consumption)
        .fold(f64::INFINITY, f64::min);
    assert_eq!(report.best_value(), Some(min));
}

#[test]
fn grid_is_reproducible() {
    let model = PerformanceModel::default();
    let opt = Optimizer::new(&model);
    let ranges = [
        GridRange::new(DesignField::ChamberLength, 30.0, 70.0),
        GridRange::new(DesignField::IntakeDiameter, 4.0, 10.0),
        GridRange::new(DesignField::ValveCount, 2.0, 6.0),
    ];
    let design = SampleEngine::Medium.design();
    let first = opt.grid_search(&design, &ranges, Objective::Thrust).unwrap();
    let second = opt.grid_search(&design, &ranges, Objective::Thrust).unwrap();

    assert_eq!(first.num_evaluated(), 125);
    assert_eq!(first, second);
}

#[test]
fn grid_ties_resolve_to_first_row() {
    let model = PerformanceModel::default();
    let opt = Optimizer::new(&model);
    // Valve count does not enter the model, so every row ties
    let ranges = [GridRange::new(DesignField::ValveCount, 1.0, 9.0)];
    let report = opt
        .grid_search(&reference_design(), &ranges, Objective::Thrust)
        .unwrap();
    assert_eq!(report.best_index, Some(0));
}

#[test]
fn unknown_field_name_fails_fast() {
    let err = "combustion_pressure".parse::<DesignField>().unwrap_err();
    let wrapped: OptimizeError = err.into();
    assert!(matches!(wrapped, OptimizeError::Core(_)));
}

#[test]
fn unevaluable_baseline_is_rejected_before_batch() {
    let model = PerformanceModel::default();
    let opt = Optimizer::new(&model);
    let base = reference_design();
    let broken = EngineDesign::new(
        GeometrySpec::new(50.0, 15.0, 8.0, 1e160, 80.0).unwrap(),
        base.valves,
        base.operating,
    );

    assert!(matches!(
        opt.sweep(&broken, DesignField::ExhaustLength, &[40.0, 80.0]),
        Err(OptimizeError::InvalidBaseline(_))
    ));
    assert!(matches!(
        opt.sensitivity(&broken, &[DesignField::ExhaustLength]),
        Err(OptimizeError::InvalidBaseline(_))
    ));
}

#[test]
fn partial_sweep_failures_keep_remaining_rows() {
    let model = PerformanceModel::default();
    let opt = Optimizer::new(&model);
    let values = [8.0, 1e160, 12.0];
    let table = opt
        .sweep(&reference_design(), DesignField::ExhaustDiameter, &values)
        .unwrap();
    assert_eq!(table.failed, vec![false, true, false]);
    assert!(table.thrust[0] > 0.0 && table.thrust[2] > 0.0);
}
