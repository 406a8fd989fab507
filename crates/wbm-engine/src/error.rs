//! Model engine errors.

use thiserror::Error;
use wbm_core::WbmError;

/// Result type for model engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors reported by a model engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// No robot model is loaded (or the backend cannot serve the query).
    #[error("Model unavailable: {message}")]
    Unavailable { message: String },

    /// A buffer handed to the engine has the wrong length.
    #[error("Dimension mismatch for {what} (expected={expected}, actual={actual})")]
    Dimension {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A dynamics query was issued before any state was set.
    #[error("Robot state has not been set")]
    StateNotSet,

    /// Non-physical values (non-finite torques, inverted limits, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },
}

impl EngineError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        EngineError::Unavailable {
            message: message.into(),
        }
    }
}

impl From<EngineError> for WbmError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Unavailable { message } => WbmError::Unavailable { what: message },
            EngineError::Dimension {
                what,
                expected,
                actual,
            } => WbmError::Dimension {
                what,
                expected,
                actual,
            },
            EngineError::StateNotSet => WbmError::Invariant {
                what: "robot state has not been set",
            },
            EngineError::NonPhysical { what } => WbmError::Invariant { what },
        }
    }
}
