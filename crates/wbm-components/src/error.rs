//! Error types for component operations.

use thiserror::Error;
use wbm_core::error::WbmError;
use wbm_engine::EngineError;

/// Errors that can occur while validating, marshaling or computing a
/// component call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Wrong number of {what} (expected={expected}, actual={actual})")]
    Arity {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Argument {what} must be a vector of length {expected}, got {rows}x{cols}")]
    Shape {
        what: &'static str,
        expected: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Non-finite value in {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Model engine unavailable: {message}")]
    EngineUnavailable { message: String },

    #[error("Output buffer not allocated: {what}")]
    Allocation { what: &'static str },

    #[error("Output {what} has length {allocated} but the model has {model} DoF")]
    DofMismatch {
        what: &'static str,
        allocated: usize,
        model: usize,
    },

    #[error("Model DoF changed from {cached} to {model} since the component was created")]
    DofChanged { cached: usize, model: usize },

    #[error("Unknown component: {name}")]
    UnknownComponent { name: String },

    #[error("Engine error: {0}")]
    Engine(EngineError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<EngineError> for ComponentError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Unavailable { message } => ComponentError::EngineUnavailable { message },
            other => ComponentError::Engine(other),
        }
    }
}

impl From<ComponentError> for WbmError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::Arity {
                what,
                expected,
                actual,
            } => WbmError::Dimension {
                what,
                expected,
                actual,
            },
            ComponentError::Shape {
                what,
                expected,
                rows,
                cols,
            } => WbmError::Dimension {
                what,
                expected,
                actual: rows * cols,
            },
            ComponentError::NonFinite { what, value } => WbmError::NonFinite { what, value },
            ComponentError::EngineUnavailable { message } => WbmError::Unavailable { what: message },
            ComponentError::Allocation { what } => WbmError::InvalidArg { what },
            ComponentError::DofMismatch { .. } | ComponentError::DofChanged { .. } => {
                WbmError::Invariant {
                    what: "output size must match model DoF",
                }
            }
            ComponentError::UnknownComponent { .. } => WbmError::InvalidArg {
                what: "unknown component",
            },
            ComponentError::Engine(e) => e.into(),
        }
    }
}
