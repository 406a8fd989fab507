//! Reference model engine built on frozen (linearized) dynamics.
//!
//! The model is built from a `FrozenModelDescription` and answers inverse
//! dynamics with a fixed sequence of dense products, so identical states
//! always produce bit-identical torques. It is NOT a general rigid-body
//! solver: the dynamics terms are constant around one operating point.

use nalgebra::{DMatrix, DVector};
use tracing::debug;
use wbm_core::ensure_all_finite;

use crate::description::{FrozenModelDescription, to_matrix};
use crate::error::{EngineError, EngineResult};
use crate::model::ModelEngine;
use crate::state::{GRAVITY_LEN, RobotState, TWIST_LEN};

#[derive(Debug, Clone)]
struct LoadedModel {
    name: String,
    joint_names: Vec<String>,
    lower: Vec<f64>,
    upper: Vec<f64>,
    q_ref: DVector<f64>,
    mass: DMatrix<f64>,
    damping: DMatrix<f64>,
    stiffness: DMatrix<f64>,
    base_acceleration: DMatrix<f64>,
    base_velocity: DMatrix<f64>,
    gravity: DMatrix<f64>,
}

impl LoadedModel {
    fn dof(&self) -> usize {
        self.joint_names.len()
    }
}

/// Last state pushed through `set_state`, owned by the engine.
#[derive(Debug, Clone)]
struct StoredState {
    qj: DVector<f64>,
    qj_dot: DVector<f64>,
    qj_ddot: DVector<f64>,
    vb: DVector<f64>,
    vb_dot: DVector<f64>,
    g: DVector<f64>,
}

impl StoredState {
    fn zeros(dof: usize) -> Self {
        Self {
            qj: DVector::zeros(dof),
            qj_dot: DVector::zeros(dof),
            qj_ddot: DVector::zeros(dof),
            vb: DVector::zeros(TWIST_LEN),
            vb_dot: DVector::zeros(TWIST_LEN),
            g: DVector::zeros(GRAVITY_LEN),
        }
    }

    fn copy_from(&mut self, state: &RobotState<'_>) {
        self.qj.copy_from_slice(state.qj);
        self.qj_dot.copy_from_slice(state.qj_dot);
        self.qj_ddot.copy_from_slice(state.qj_ddot);
        self.vb.copy_from_slice(state.vb);
        self.vb_dot.copy_from_slice(state.vb_dot);
        self.g.copy_from_slice(state.g);
    }
}

/// Linearized whole-body model engine.
#[derive(Debug, Clone, Default)]
pub struct FrozenDynamicsModel {
    model: Option<LoadedModel>,
    state: Option<StoredState>,
    revision: u64,
}

impl FrozenDynamicsModel {
    /// An engine with no model loaded; every query reports `Unavailable`.
    pub fn unloaded() -> Self {
        Self::default()
    }

    /// Build an engine and load the given description.
    pub fn from_description(desc: &FrozenModelDescription) -> EngineResult<Self> {
        let mut engine = Self::unloaded();
        engine.load(desc)?;
        Ok(engine)
    }

    /// Load (or replace) the robot model. Any previously set state is dropped.
    pub fn load(&mut self, desc: &FrozenModelDescription) -> EngineResult<()> {
        desc.validate()
            .map_err(|e| EngineError::unavailable(e.to_string()))?;

        let n = desc.dof();
        self.model = Some(LoadedModel {
            name: desc.name.clone(),
            joint_names: desc.joints.iter().map(|j| j.name.clone()).collect(),
            lower: desc.joints.iter().map(|j| j.lower).collect(),
            upper: desc.joints.iter().map(|j| j.upper).collect(),
            q_ref: desc.q_ref_vector(),
            mass: to_matrix(&desc.mass, n, n),
            damping: to_matrix(&desc.damping, n, n),
            stiffness: to_matrix(&desc.stiffness, n, n),
            base_acceleration: to_matrix(&desc.base_acceleration_coupling, n, TWIST_LEN),
            base_velocity: to_matrix(&desc.base_velocity_coupling, n, TWIST_LEN),
            gravity: to_matrix(&desc.gravity_coupling, n, GRAVITY_LEN),
        });
        self.state = None;
        debug!(model = %desc.name, dof = n, "frozen dynamics model loaded");
        Ok(())
    }

    /// Drop the loaded model.
    pub fn unload(&mut self) {
        self.model = None;
        self.state = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Name of the loaded robot model, if any.
    pub fn model_name(&self) -> Option<&str> {
        self.model.as_ref().map(|m| m.name.as_str())
    }

    pub fn joint_names(&self) -> EngineResult<&[String]> {
        Ok(&self.loaded()?.joint_names)
    }

    /// Number of successful `set_state` calls since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn loaded(&self) -> EngineResult<&LoadedModel> {
        self.model
            .as_ref()
            .ok_or_else(|| EngineError::unavailable("no robot model loaded"))
    }
}

fn check_len(what: &'static str, buf: &[f64], expected: usize) -> EngineResult<()> {
    if buf.len() != expected {
        return Err(EngineError::Dimension {
            what,
            expected,
            actual: buf.len(),
        });
    }
    Ok(())
}

impl ModelEngine for FrozenDynamicsModel {
    fn name(&self) -> &str {
        "FrozenDynamics"
    }

    fn degrees_of_freedom(&self) -> EngineResult<usize> {
        Ok(self.loaded()?.dof())
    }

    fn set_state(&mut self, state: &RobotState<'_>) -> EngineResult<()> {
        let dof = self.loaded()?.dof();
        state.check_dimensions(dof)?;

        self.state
            .get_or_insert_with(|| StoredState::zeros(dof))
            .copy_from(state);
        self.revision += 1;
        Ok(())
    }

    fn inverse_dynamics(&self, tau: &mut [f64]) -> EngineResult<()> {
        let model = self.loaded()?;
        let state = self.state.as_ref().ok_or(EngineError::StateNotSet)?;
        check_len("tau", tau, model.dof())?;

        let q_err = &state.qj - &model.q_ref;
        let result = &model.mass * &state.qj_ddot
            + &model.damping * &state.qj_dot
            + &model.stiffness * q_err
            + &model.base_acceleration * &state.vb_dot
            + &model.base_velocity * &state.vb
            - &model.gravity * &state.g;

        ensure_all_finite(result.as_slice(), "tau").map_err(|_| EngineError::NonPhysical {
            what: "joint torque must be finite",
        })?;
        tau.copy_from_slice(result.as_slice());
        Ok(())
    }

    fn joint_limits(&self, lower: &mut [f64], upper: &mut [f64]) -> EngineResult<()> {
        let model = self.loaded()?;
        check_len("jntlim_lower", lower, model.dof())?;
        check_len("jntlim_upper", upper, model.dof())?;

        lower.copy_from_slice(&model.lower);
        upper.copy_from_slice(&model.upper);
        Ok(())
    }
}
