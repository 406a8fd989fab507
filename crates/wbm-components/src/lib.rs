//! wbm-components: whole-body model components for a host numeric environment.
//!
//! Provides singleton computation units over a `ModelEngine`:
//! - `InverseDynamics`: joint torques from `(qj, qj_dot, qj_ddot, vb, vb_dot, g)`
//! - `JointLimits`: per-joint lower/upper position bounds
//!
//! Every component implements `ModelComponent` with a validated `compute` and
//! an unvalidated `compute_fast`. The `ComponentManager` owns the engine and
//! the per-kind registry and exposes the boolean host operations.
//!
//! # Example
//!
//! ```
//! use wbm_components::{ComponentKind, ComponentManager, HostArray};
//! use wbm_engine::{FrozenDynamicsModel, FrozenModelDescription};
//!
//! let desc = FrozenModelDescription::zero_dynamics(&[(-1.0, 1.0), (-0.5, 2.0)]);
//! let engine = FrozenDynamicsModel::from_description(&desc).unwrap();
//! let mut manager = ComponentManager::with_defaults(Box::new(engine));
//!
//! let mut outputs: Vec<Option<HostArray>> = vec![None];
//! assert!(manager.allocate_return_space(ComponentKind::InverseDynamics, 1, &mut outputs));
//!
//! let inputs = vec![
//!     HostArray::column(vec![0.0; 2]),
//!     HostArray::column(vec![0.0; 2]),
//!     HostArray::column(vec![0.0; 2]),
//!     HostArray::column(vec![0.0; 6]),
//!     HostArray::column(vec![0.0; 6]),
//!     HostArray::column(vec![0.0, 0.0, -9.81]),
//! ];
//! assert!(manager.compute(ComponentKind::InverseDynamics, 6, &inputs, &mut outputs));
//! assert!(manager.compute_fast(ComponentKind::InverseDynamics, 6, &inputs, &mut outputs));
//! ```

pub mod buffer;
pub mod common;
pub mod config;
pub mod error;
pub mod inverse_dynamics;
pub mod joint_limits;
pub mod manager;
pub mod registry;
pub mod traits;

// Re-exports
pub use buffer::HostArray;
pub use config::{ConfigError, ConfigResult, ManagerConfig};
pub use error::{ComponentError, ComponentResult};
pub use inverse_dynamics::InverseDynamics;
pub use joint_limits::JointLimits;
pub use manager::ComponentManager;
pub use registry::{ComponentRegistry, InstanceState};
pub use traits::{ComponentKind, ModelComponent};
