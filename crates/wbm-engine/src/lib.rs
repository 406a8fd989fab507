//! wbm-engine: the model engine boundary for whole-body model components.
//!
//! Provides:
//! - `ModelEngine` trait: the dynamics collaborator the components drive
//! - `RobotState`: call-scoped view of the six state vectors
//! - `FrozenDynamicsModel`: a reference engine that linearizes rigid-body
//!   dynamics around an operating point
//! - `FrozenModelDescription`: serde description used to load that engine
//!
//! # Architecture
//!
//! Components only shape and forward data. Everything that knows about the
//! robot (joint count, limits, dynamics) lives behind `ModelEngine`, so a
//! full rigid-body library can be plugged in without touching the component
//! layer.
//!
//! # Example
//!
//! ```
//! use wbm_engine::{FrozenDynamicsModel, FrozenModelDescription, ModelEngine, RobotState};
//!
//! let desc = FrozenModelDescription::zero_dynamics(&[(-1.0, 1.0), (-2.0, 2.0)]);
//! let mut engine = FrozenDynamicsModel::from_description(&desc).unwrap();
//!
//! let zeros = [0.0; 2];
//! let twist = [0.0; 6];
//! let g = [0.0, 0.0, -9.81];
//! engine
//!     .set_state(&RobotState::new(&zeros, &zeros, &zeros, &twist, &twist, &g))
//!     .unwrap();
//!
//! let mut tau = [1.0; 2];
//! engine.inverse_dynamics(&mut tau).unwrap();
//! assert_eq!(tau, [0.0, 0.0]);
//! ```

pub mod description;
pub mod error;
pub mod frozen;
pub mod model;
pub mod state;

// Re-exports for ergonomics
pub use description::{DescriptionError, DescriptionResult, FrozenModelDescription, JointDescription};
pub use error::{EngineError, EngineResult};
pub use frozen::FrozenDynamicsModel;
pub use model::ModelEngine;
pub use state::{GRAVITY_LEN, RobotState, TWIST_LEN};
