//! Inverse dynamics component: joint torques from the full robot state.

use std::sync::Arc;

use tracing::{debug, trace};
use wbm_core::timing::CallTimings;
use wbm_engine::{ModelEngine, RobotState};

use crate::buffer::HostArray;
use crate::common::{bind_outputs, bound_output, check_arity, check_finite, live_dof, vector_arg};
use crate::config::ManagerConfig;
use crate::error::ComponentResult;
use crate::traits::{ComponentKind, ModelComponent};

/// Host argument names, in the order the host passes them.
pub const INPUT_NAMES: [&str; 6] = ["qj", "qj_dot", "qj_ddot", "vb", "vb_dot", "g"];

/// Computes `tau` from `(qj, qj_dot, qj_ddot, vb, vb_dot, g)`.
#[derive(Debug, Clone)]
pub struct InverseDynamics {
    dof: usize,
    check_finite: bool,
    timings: Arc<CallTimings>,
}

impl InverseDynamics {
    /// Create the component, caching the model DoF.
    pub fn new(engine: &dyn ModelEngine, config: &ManagerConfig) -> ComponentResult<Self> {
        let dof = engine.degrees_of_freedom()?;
        debug!(dof, engine = engine.name(), "inverse dynamics component created");
        Ok(Self {
            dof,
            check_finite: config.check_finite,
            timings: Arc::new(CallTimings::new(config.timing)),
        })
    }

    /// Record engine stages into shared timings.
    pub fn with_timings(mut self, timings: Arc<CallTimings>) -> Self {
        self.timings = timings;
        self
    }

    fn solve(
        &self,
        engine: &mut dyn ModelEngine,
        state: &RobotState<'_>,
        tau: &mut [f64],
    ) -> ComponentResult<()> {
        let timer = self.timings.timer();
        engine.set_state(state)?;
        timer.stop_into(&self.timings.engine_set_state);

        let timer = self.timings.timer();
        engine.inverse_dynamics(tau)?;
        timer.stop_into(&self.timings.engine_query);
        Ok(())
    }
}

impl ModelComponent for InverseDynamics {
    fn kind(&self) -> ComponentKind {
        ComponentKind::InverseDynamics
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
        check_arity("inputs", inputs.len(), self.num_inputs())?;
        check_arity("outputs", outputs.len(), self.num_outputs())?;
        let dof = live_dof(engine, self.dof)?;

        let mut args: [&[f64]; 6] = [&[][..]; 6];
        let expected = RobotState::expected_lengths(dof);
        for (i, arg) in inputs.iter().enumerate() {
            args[i] = vector_arg(arg, INPUT_NAMES[i], expected[i])?;
            if self.check_finite {
                check_finite(args[i], INPUT_NAMES[i])?;
            }
        }

        let tau = bound_output(&mut outputs[0], "tau", dof)?;
        let state = RobotState::new(args[0], args[1], args[2], args[3], args[4], args[5]);
        trace!(dof, "inverse dynamics (validated)");
        self.solve(engine, &state, tau)
    }

    fn compute_fast(
        &self,
        engine: &mut dyn ModelEngine,
        inputs: &[HostArray],
        outputs: &mut [Option<HostArray>],
    ) -> ComponentResult<()> {
        check_arity("inputs", inputs.len(), self.num_inputs())?;
        check_arity("outputs", outputs.len(), self.num_outputs())?;
        let dof = live_dof(engine, self.dof)?;
        let tau = bound_output(&mut outputs[0], "tau", dof)?;

        let state = RobotState::new(
            inputs[0].as_slice(),
            inputs[1].as_slice(),
            inputs[2].as_slice(),
            inputs[3].as_slice(),
            inputs[4].as_slice(),
            inputs[5].as_slice(),
        );
        self.solve(engine, &state, tau)
    }
}
