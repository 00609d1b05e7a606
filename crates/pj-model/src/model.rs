//! Performance model: constants + fuel table + pipeline.

use crate::constants::ModelConstants;
use crate::error::ModelResult;
use crate::pipeline::{self, PipelineTrace};
use crate::result::PerformanceResult;
use pj_core::{EngineDesign, FuelTable, GeometrySpec, OperatingSpec, ValveSpec};
use tracing::{debug, warn};

/// Evaluates designs against a fixed set of constants and fuel data.
#[derive(Debug, Clone, Default)]
pub struct PerformanceModel {
    constants: ModelConstants,
    fuels: FuelTable,
}

impl PerformanceModel {
    pub fn new(constants: ModelConstants, fuels: FuelTable) -> ModelResult<Self> {
        constants.validate()?;
        Ok(Self { constants, fuels })
    }

    pub fn constants(&self) -> &ModelConstants {
        &self.constants
    }

    pub fn fuels(&self) -> &FuelTable {
        &self.fuels
    }

    /// Run every stage and keep the intermediate values.
    pub fn trace(
        &self,
        geometry: &GeometrySpec,
        valves: &ValveSpec,
        operating: &OperatingSpec,
    ) -> ModelResult<PipelineTrace> {
        let fuel = self.fuels.get(operating.fuel_type());
        pipeline::run(geometry, valves, operating, fuel, &self.constants)
    }

    /// Like [`evaluate`](Self::evaluate), but a pipeline failure is returned
    /// instead of being folded into a zeroed result.
    pub fn evaluate_checked(
        &self,
        geometry: &GeometrySpec,
        valves: &ValveSpec,
        operating: &OperatingSpec,
    ) -> ModelResult<PerformanceResult> {
        let trace = self.trace(geometry, valves, operating)?;
        let result = PerformanceResult::from_trace(&trace, &self.constants);
        debug!(
            thrust_n = result.thrust,
            frequency_hz = result.frequency,
            efficiency_pct = result.thermal_efficiency,
            "evaluated design"
        );
        Ok(result)
    }

    /// Never fails. A pipeline error is logged and yields
    /// [`PerformanceResult::failed`].
    pub fn evaluate(
        &self,
        geometry: &GeometrySpec,
        valves: &ValveSpec,
        operating: &OperatingSpec,
    ) -> PerformanceResult {
        match self.evaluate_checked(geometry, valves, operating) {
            Ok(result) => result,
            Err(err) => {
                warn!(%err, "performance evaluation failed, returning zeroed result");
                PerformanceResult::failed()
            }
        }
    }

    pub fn evaluate_design(&self, design: &EngineDesign) -> PerformanceResult {
        self.evaluate(&design.geometry, &design.valves, &design.operating)
    }

    pub fn evaluate_design_checked(&self, design: &EngineDesign) -> ModelResult<PerformanceResult> {
        self.evaluate_checked(&design.geometry, &design.valves, &design.operating)
    }
}
