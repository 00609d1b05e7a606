mod error;

use clap::{Parser, Subcommand};
use error::{CliError, CliResult};
use pj_core::{DesignField, EngineDesign, FuelOverride, FuelTable, SampleEngine};
use pj_model::{ModelConstants, PerformanceModel, PerformanceResult};
use pj_optimize::{
    DEFAULT_GRID_POINTS, DEFAULT_RELATIVE_STEP, DEFAULT_SENSITIVITY_FIELDS, GridRange, Objective,
    Optimizer, SuggestionCategory, design_score, suggestions, trade_offs,
};
use pj_validate::sanitize::{RawGeometry, RawOperating, RawValves};
use pj_validate::{DesignParams, DesignValidation, RawDesign, Tier, Validator, validation_limits};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pj-cli")]
#[command(about = "Pulse jet performance estimator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a design, then estimate its performance
    Analyze {
        /// Path to the design YAML file
        design_path: PathBuf,
        #[arg(long, default_value_t = Tier::Normal)]
        tier: Tier,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        /// Evaluate even when validation reports critical findings
        #[arg(long)]
        force: bool,
    },
    /// Print categorized validation findings
    Validate {
        /// Path to the design YAML file
        design_path: PathBuf,
        #[arg(long, default_value_t = Tier::Normal)]
        tier: Tier,
        #[arg(long)]
        json: bool,
    },
    /// Sweep one field over a range
    Sweep {
        /// Path to the design YAML file
        design_path: PathBuf,
        /// Field name (e.g., exhaust_length, air_fuel_ratio)
        #[arg(long)]
        field: DesignField,
        #[arg(long)]
        from: f64,
        #[arg(long)]
        to: f64,
        #[arg(long, default_value_t = 20)]
        points: usize,
        #[arg(long)]
        json: bool,
    },
    /// Thrust sensitivity to small changes in each field
    Sensitivity {
        /// Path to the design YAML file
        design_path: PathBuf,
        /// Fields to perturb (repeatable); defaults to the common four
        #[arg(long = "field")]
        fields: Vec<DesignField>,
        /// Relative perturbation step
        #[arg(long, default_value_t = DEFAULT_RELATIVE_STEP)]
        step: f64,
        #[arg(long)]
        json: bool,
    },
    /// Grid search over up to three fields
    Optimize {
        /// Path to the design YAML file
        design_path: PathBuf,
        /// FIELD=MIN:MAX (repeatable, 1 to 3 times)
        #[arg(long = "range", required = true, value_parser = parse_range)]
        ranges: Vec<GridRange>,
        #[arg(long, default_value_t = Objective::Thrust)]
        objective: Objective,
        /// Points per dimension
        #[arg(long, default_value_t = DEFAULT_GRID_POINTS)]
        resolution: usize,
        #[arg(long)]
        json: bool,
    },
    /// Print a built-in sample design as YAML
    Sample {
        #[arg(long, default_value = "medium")]
        size: SampleEngine,
    },
    /// Print the validation bounds of a tier
    Limits {
        #[arg(long, default_value_t = Tier::Normal)]
        tier: Tier,
    },
    /// Print the design trade-off reference
    TradeOffs,
}

/// On-disk design: raw parameter sections plus optional model overrides.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DesignFile {
    geometry: RawGeometry,
    valves: RawValves,
    operating: RawOperating,
    constants: ModelConstants,
    fuels: BTreeMap<String, FuelOverride>,
}

impl DesignFile {
    fn load(path: &Path) -> CliResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::DesignFileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_yaml::from_str(&text)?)
    }

    fn raw(&self) -> RawDesign {
        RawDesign {
            geometry: self.geometry.clone(),
            valves: self.valves.clone(),
            operating: self.operating.clone(),
        }
    }

    fn fuel_table(&self) -> FuelTable {
        FuelTable::from_overrides(&self.fuels)
    }

    fn model(&self) -> CliResult<PerformanceModel> {
        Ok(PerformanceModel::new(self.constants, self.fuel_table())?)
    }

    /// Sanitized, checked design; any coercion failure is fatal here.
    fn design(&self) -> CliResult<EngineDesign> {
        let (params, validation) = Validator::default()
            .with_fuels(self.fuel_table())
            .validate_raw(&self.raw());
        if !validation.input.is_valid {
            print_validation(&validation);
            return Err(CliError::Rejected {
                errors: validation.input.errors.len(),
            });
        }
        Ok(params.to_design()?)
    }
}

fn parse_range(s: &str) -> Result<GridRange, String> {
    let usage = || format!("expected FIELD=MIN:MAX, got '{s}'");
    let (field, bounds) = s.split_once('=').ok_or_else(usage)?;
    let (min, max) = bounds.split_once(':').ok_or_else(usage)?;
    let field: DesignField = field.parse().map_err(|e| format!("{e}"))?;
    let min: f64 = min.trim().parse().map_err(|_| usage())?;
    let max: f64 = max.trim().parse().map_err(|_| usage())?;
    Ok(GridRange::new(field, min, max))
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            design_path,
            tier,
            json,
            force,
        } => cmd_analyze(&design_path, tier, json, force),
        Commands::Validate {
            design_path,
            tier,
            json,
        } => cmd_validate(&design_path, tier, json),
        Commands::Sweep {
            design_path,
            field,
            from,
            to,
            points,
            json,
        } => cmd_sweep(&design_path, field, from, to, points, json),
        Commands::Sensitivity {
            design_path,
            fields,
            step,
            json,
        } => cmd_sensitivity(&design_path, &fields, step, json),
        Commands::Optimize {
            design_path,
            ranges,
            objective,
            resolution,
            json,
        } => cmd_optimize(&design_path, &ranges, objective, resolution, json),
        Commands::Sample { size } => cmd_sample(size),
        Commands::Limits { tier } => cmd_limits(tier),
        Commands::TradeOffs => cmd_trade_offs(),
    }
}

fn print_validation(validation: &DesignValidation) {
    print!("{validation}");
}

fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn rejected(validation: &DesignValidation) -> CliError {
    CliError::Rejected {
        errors: validation.overall().errors.len(),
    }
}

#[derive(Serialize)]
struct AnalysisReport<'a> {
    validation: &'a DesignValidation,
    performance: Option<PerformanceResult>,
    suggestions: BTreeMap<SuggestionCategory, String>,
    design_score: Option<f64>,
}

fn cmd_analyze(design_path: &Path, tier: Tier, json: bool, force: bool) -> CliResult<()> {
    let file = DesignFile::load(design_path)?;
    let model = file.model()?;
    let validator = Validator::new(tier).with_fuels(file.fuel_table());
    let (params, validation) = validator.validate_raw(&file.raw());

    let evaluate = validation.is_acceptable() || force;
    let (performance, feedback) = if evaluate {
        let design = params.to_design()?;
        let result = model.evaluate_design_checked(&design)?;
        (Some(result), suggestions(&design.geometry, &result))
    } else {
        (None, BTreeMap::new())
    };

    if json {
        print_json(&AnalysisReport {
            validation: &validation,
            performance,
            suggestions: feedback,
            design_score: performance.as_ref().map(design_score),
        })?;
    } else {
        print_validation(&validation);
        if let Some(result) = &performance {
            println!("\n{result}");
            println!("\nDesign Suggestions:");
            for (category, text) in &feedback {
                println!("  {category}: {text}");
            }
            println!("\nDesign score: {:.1} / 100", design_score(result));
        }
    }

    if evaluate {
        Ok(())
    } else {
        Err(rejected(&validation))
    }
}

fn cmd_validate(design_path: &Path, tier: Tier, json: bool) -> CliResult<()> {
    let file = DesignFile::load(design_path)?;
    let (_params, validation) = Validator::new(tier)
        .with_fuels(file.fuel_table())
        .validate_raw(&file.raw());

    if json {
        print_json(&validation)?;
    } else {
        print_validation(&validation);
    }

    if validation.is_acceptable() {
        Ok(())
    } else {
        Err(rejected(&validation))
    }
}

fn cmd_sweep(
    design_path: &Path,
    field: DesignField,
    from: f64,
    to: f64,
    points: usize,
    json: bool,
) -> CliResult<()> {
    let file = DesignFile::load(design_path)?;
    let model = file.model()?;
    let design = file.design()?;
    let table = Optimizer::new(&model).sweep_range(&design, field, from, to, points)?;

    if json {
        return print_json(&table);
    }

    println!(
        "Sweep of {field} [{}] ({} ok, {} failed)",
        field.unit(),
        table.num_successful,
        table.num_failed
    );
    println!(
        "  {:>12} {:>10} {:>8} {:>8} {:>8} {:>9} {:>9}",
        "value", "thrust N", "freq Hz", "Isp s", "eff %", "power kW", "fuel kg/h"
    );
    for i in 0..table.len() {
        let flag = if table.failed[i] { "  (failed)" } else { "" };
        println!(
            "  {:>12.3} {:>10.1} {:>8.1} {:>8.0} {:>8.2} {:>9.1} {:>9.2}{flag}",
            table.values[i],
            table.thrust[i],
            table.frequency[i],
            table.specific_impulse[i],
            table.thermal_efficiency[i],
            table.power[i],
            table.fuel_consumption[i],
        );
    }
    if let Some(best) = table.argmax(&table.thrust) {
        println!("\nPeak thrust at {field} = {:.3}", table.values[best]);
    }
    Ok(())
}

fn cmd_sensitivity(design_path: &Path, fields: &[DesignField], step: f64, json: bool) -> CliResult<()> {
    let file = DesignFile::load(design_path)?;
    let model = file.model()?;
    let design = file.design()?;
    let optimizer = Optimizer::new(&model).with_relative_step(step)?;

    let fields = if fields.is_empty() {
        &DEFAULT_SENSITIVITY_FIELDS[..]
    } else {
        fields
    };
    let report = optimizer.sensitivity(&design, fields)?;

    if json {
        return print_json(&report);
    }

    println!("Baseline thrust: {:.1} N", report.baseline_thrust);
    println!("Thrust sensitivity (% thrust per % change), largest first:");
    for entry in report.ranked() {
        println!(
            "  {:<28} {:>+8.3}  ({} -> {})",
            entry.field.key(),
            entry.coefficient,
            entry.baseline_value,
            entry.perturbed_value
        );
    }
    Ok(())
}

fn cmd_optimize(
    design_path: &Path,
    ranges: &[GridRange],
    objective: Objective,
    resolution: usize,
    json: bool,
) -> CliResult<()> {
    let file = DesignFile::load(design_path)?;
    let model = file.model()?;
    let design = file.design()?;
    let optimizer = Optimizer::new(&model).with_grid_resolution(resolution)?;
    let report = optimizer.grid_search(&design, ranges, objective)?;

    if json {
        return print_json(&report);
    }

    println!(
        "Grid search for {objective}: {} combinations, {} failed",
        report.num_evaluated(),
        report.num_failed
    );
    match report.best() {
        Some(best) => {
            println!("Best {objective}: {:.3}", best.objective_value);
            for (field, value) in report.fields.iter().zip(&best.values) {
                println!("  {field} = {value:.3} {}", field.unit());
            }
            println!("\n{}", best.result);
        }
        None => println!("No combination could be evaluated"),
    }
    Ok(())
}

fn cmd_sample(size: SampleEngine) -> CliResult<()> {
    let params = DesignParams::from(&size.design());
    print!("{}", serde_yaml::to_string(&params)?);
    Ok(())
}

fn cmd_limits(tier: Tier) -> CliResult<()> {
    let limits = validation_limits(tier);
    println!("Validation limits ({tier}):");
    println!("\nGeometry [cm]:");
    let g = &limits.geometry;
    println!("  combustion_chamber_length    {}", g.combustion_chamber_length);
    println!("  combustion_chamber_diameter  {}", g.combustion_chamber_diameter);
    println!("  intake_diameter              {}", g.intake_diameter);
    println!("  exhaust_diameter             {}", g.exhaust_diameter);
    println!("  exhaust_length               {}", g.exhaust_length);
    println!("  L/D ratio                    {}", g.ld_ratio);
    println!("  area ratio                   {}", g.area_ratio);
    println!("\nValves:");
    let v = &limits.valves;
    println!("  num_valves                   {}", v.num_valves);
    println!("  valve_area [cm²]             {}", v.valve_area);
    println!("  valve/intake area ratio      {}", v.valve_to_intake_ratio);
    println!("\nOperating:");
    let o = &limits.operating;
    println!("  ambient_pressure [kPa]       {}", o.ambient_pressure);
    println!("  ambient_temp [°C]            {}", o.ambient_temp);
    println!("  AFR tolerance                ±{:.0}%", o.afr_tolerance * 100.0);
    Ok(())
}

fn cmd_trade_offs() -> CliResult<()> {
    for t in trade_offs() {
        println!("{}", t.parameter);
        println!("  Increasing benefits: {}", t.increase_benefits.join("; "));
        println!("  Increasing drawbacks: {}", t.increase_drawbacks.join("; "));
        println!("  Optimal range: {}\n", t.optimal_range);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_argument_parsing() {
        let r = parse_range("exhaust_length=60:120").unwrap();
        assert_eq!(r, GridRange::new(DesignField::ExhaustLength, 60.0, 120.0));
        assert!(parse_range("exhaust_length=60").is_err());
        assert!(parse_range("tail_fin=1:2").is_err());
    }

    #[test]
    fn sample_yaml_reloads_as_design_file() {
        let yaml = serde_yaml::to_string(&DesignParams::from(&SampleEngine::Small.design())).unwrap();
        let file: DesignFile = serde_yaml::from_str(&yaml).unwrap();
        let design = file.design().unwrap();
        assert_eq!(design, SampleEngine::Small.design());
    }

    #[test]
    fn design_file_overrides_constants_partially() {
        let yaml = "constants:\n  gamma: 1.35\n";
        let file: DesignFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.constants.gamma, 1.35);
        assert_eq!(file.constants.gravity, ModelConstants::default().gravity);
        assert!(file.design().is_err());
    }
}
