//! Core traits for model components.

use std::fmt;
use std::str::FromStr;

use crate::buffer::HostArray;
use crate::error::{ComponentError, ComponentResult};
use wbm_engine::ModelEngine;

/// The component kinds a host can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    InverseDynamics,
    JointLimits,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 2] = [ComponentKind::InverseDynamics, ComponentKind::JointLimits];

    /// Stable name used by the host to address the component.
    pub fn host_name(self) -> &'static str {
        match self {
            ComponentKind::InverseDynamics => "inverse-dynamics",
            ComponentKind::JointLimits => "joint-limits",
        }
    }

    /// Required number of input buffers.
    pub fn num_inputs(self) -> usize {
        match self {
            ComponentKind::InverseDynamics => 6,
            ComponentKind::JointLimits => 0,
        }
    }

    /// Number of declared output buffers.
    pub fn num_outputs(self) -> usize {
        match self {
            ComponentKind::InverseDynamics => 1,
            ComponentKind::JointLimits => 2,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_name())
    }
}

impl FromStr for ComponentKind {
    type Err = ComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.host_name() == s)
            .ok_or_else(|| ComponentError::UnknownComponent { name: s.to_string() })
    }
}

/// Capability contract shared by every model component.
///
/// A component is created once per kind (see `ComponentRegistry`), caches the
/// model DoF at creation, and serves many host calls. Host buffers are only
/// borrowed for the duration of a call; components never keep them.
///
/// `compute` is the safe path: it checks arity, vector shapes and lengths
/// (and optionally finiteness) before touching the engine. `compute_fast`
/// trusts the caller to pass exactly the buffers the engine needs and only
/// keeps the cheap arity and output-size guards. Both must leave outputs
/// untouched when they fail before the engine is queried.
pub trait ModelComponent: Send {
    fn kind(&self) -> ComponentKind;

    /// DoF of the model when this component was created.
    fn dof(&self) -> usize;

    fn num_inputs(&self) -> usize {
        self.kind().num_inputs()
    }

    fn num_outputs(&self) -> usize {
        self.kind().num_outputs()
    }

    /// Allocate one DoF-sized buffer per declared output and bind it into
    /// `outputs`. Fails without binding anything if `outputs.len()` differs
    /// from `num_outputs()`.
    fn allocate_return_space(
        &self,
        engine: &dyn ModelEngine,
        outputs: &mut [Option<HostArray>],
    ) -> ComponentResult<()>;

    /// Validate and marshal `inputs`, query the engine, write `outputs`.
    fn compute(
        &self,
        engine: &mut dyn ModelEngine,
        inputs: &[HostArray],
        outputs: &mut [Option<HostArray>],
    ) -> ComponentResult<()>;

    /// Forward pre-shaped `inputs` straight to the engine.
    fn compute_fast(
        &self,
        engine: &mut dyn ModelEngine,
        inputs: &[HostArray],
        outputs: &mut [Option<HostArray>],
    ) -> ComponentResult<()>;
}
