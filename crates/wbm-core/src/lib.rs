//! wbm-core: stable foundation for the whole-body model components.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - timing (call timers for the safe and fast component paths)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod timing;

// Re-exports: nice ergonomics for downstream crates
pub use error::WbmError;
pub use numeric::*;
