//! Joint limits component: static per-joint position bounds.

use std::sync::Arc;

use tracing::debug;
use wbm_core::timing::CallTimings;
use wbm_engine::ModelEngine;

use crate::buffer::HostArray;
use crate::common::{bind_outputs, bound_output, check_arity, live_dof};
use crate::error::{ComponentError, ComponentResult};
use crate::traits::{ComponentKind, ModelComponent};

/// Reports `(jntlim_lower, jntlim_upper)` for the loaded model.
///
/// There is no per-call input, so the safe and fast paths behave the same.
#[derive(Debug, Clone)]
pub struct JointLimits {
    dof: usize,
    timings: Arc<CallTimings>,
}

impl JointLimits {
    /// Create the component, caching the model DoF.
    pub fn new(engine: &dyn ModelEngine) -> ComponentResult<Self> {
        let dof = engine.degrees_of_freedom()?;
        debug!(dof, engine = engine.name(), "joint limits component created");
        Ok(Self {
            dof,
            timings: Arc::new(CallTimings::default()),
        })
    }

    /// Record engine queries into shared timings.
    pub fn with_timings(mut self, timings: Arc<CallTimings>) -> Self {
        self.timings = timings;
        self
    }

    fn fill_limits(
        &self,
        engine: &dyn ModelEngine,
        inputs: &[HostArray],
        outputs: &mut [Option<HostArray>],
    ) -> ComponentResult<()> {
        check_arity("inputs", inputs.len(), self.num_inputs())?;
        let dof = live_dof(engine, self.dof)?;

        let [lower_slot, upper_slot] = outputs else {
            return Err(ComponentError::Arity {
                what: "outputs",
                expected: self.num_outputs(),
                actual: outputs.len(),
            });
        };
        let lower = bound_output(lower_slot, "jntlim_lower", dof)?;
        let upper = bound_output(upper_slot, "jntlim_upper", dof)?;

        let timer = self.timings.timer();
        engine.joint_limits(lower, upper)?;
        timer.stop_into(&self.timings.engine_query);
        Ok(())
    }
}

impl ModelComponent for JointLimits {
    fn kind(&self) -> ComponentKind {
        ComponentKind::JointLimits
    }

    fn dof(&self) -> usize {
        self.dof
    }

    fn allocate_return_space(
        &self,
        engine: &dyn ModelEngine,
        outputs: &mut [Option<HostArray>],
    ) -> ComponentResult<()> {
        check_arity("outputs", outputs.len(), self.num_outputs())?;
        let dof = live_dof(engine, self.dof)?;
        bind_outputs(outputs, dof);
        Ok(())
    }

    fn compute(
        &self,
        engine: &mut dyn ModelEngine,
        inputs: &[HostArray],
        outputs: &mut [Option<HostArray>],
    ) -> ComponentResult<()> {
        self.fill_limits(engine, inputs, outputs)
    }

    fn compute_fast(
        &self,
        engine: &mut dyn ModelEngine,
        inputs: &[HostArray],
        outputs: &mut [Option<HostArray>],
    ) -> ComponentResult<()> {
        self.fill_limits(engine, inputs, outputs)
    }
}
