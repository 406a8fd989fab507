//! Model engine trait.

use crate::error::EngineResult;
use crate::state::RobotState;

/// Trait for rigid-body model engines.
///
/// The engine owns the robot model and is stateful: `set_state` must be called
/// before dynamics quantities are queried, and every query reflects the most
/// recent state. Implementations must be `Send` so the owning component
/// manager can be moved to the thread that hosts it.
pub trait ModelEngine: Send {
    /// Get the engine name (for debugging/logging).
    fn name(&self) -> &str;

    /// Number of actuated joints of the loaded model.
    ///
    /// Returns `EngineError::Unavailable` when no model is loaded.
    fn degrees_of_freedom(&self) -> EngineResult<usize>;

    /// Update the model configuration with the given state.
    fn set_state(&mut self, state: &RobotState<'_>) -> EngineResult<()>;

    /// Joint torques realizing the current state, written into `tau`.
    ///
    /// `tau` must be exactly DoF long. Nothing is written on failure.
    fn inverse_dynamics(&self, tau: &mut [f64]) -> EngineResult<()>;

    /// Configured per-joint position limits, index-aligned with the joints.
    ///
    /// Both slices must be exactly DoF long. Nothing is written on failure.
    fn joint_limits(&self, lower: &mut [f64], upper: &mut [f64]) -> EngineResult<()>;
}
