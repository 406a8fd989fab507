use thiserror::Error;

#[derive(Error, Debug)]
pub enum WbmError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Dimension mismatch for {what} (expected={expected}, actual={actual})")]
    Dimension {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },

    #[error("Model unavailable: {what}")]
    Unavailable { what: String },
}
