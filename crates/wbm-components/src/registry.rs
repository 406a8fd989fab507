//! Per-kind singleton registry.
//!
//! Each component kind has one slot that moves through
//! `Uninitialized -> Active -> (deleted) -> Uninitialized`. The registry is an
//! explicit context object owned by the `ComponentManager`, so tests can
//! create as many independent registries as they like.

use std::sync::Arc;

use tracing::debug;
use wbm_core::timing::CallTimings;
use wbm_engine::ModelEngine;

use crate::config::ManagerConfig;
use crate::error::ComponentResult;
use crate::inverse_dynamics::InverseDynamics;
use crate::joint_limits::JointLimits;
use crate::traits::{ComponentKind, ModelComponent};

/// Lifecycle state of one component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    Uninitialized,
    Active,
}

struct Instance {
    id: u64,
    component: Box<dyn ModelComponent>,
}

pub struct ComponentRegistry {
    slots: [Option<Instance>; ComponentKind::ALL.len()],
    next_id: u64,
    config: ManagerConfig,
    timings: Arc<CallTimings>,
}

impl ComponentRegistry {
    /// An empty registry. Call timings are recorded only if `config.timing`.
    pub fn new(config: ManagerConfig) -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            next_id: 1,
            timings: Arc::new(CallTimings::new(config.timing)),
            config,
        }
    }

    /// Timings shared by this registry and every instance it builds.
    pub fn timings(&self) -> &CallTimings {
        &self.timings
    }

    /// Return the live instance of `kind`, creating it on first use.
    ///
    /// Creation queries the engine; if that fails the slot stays empty.
    pub fn get_instance(
        &mut self,
        kind: ComponentKind,
        engine: &dyn ModelEngine,
    ) -> ComponentResult<&dyn ModelComponent> {
        let instance = match &mut self.slots[kind.index()] {
            Some(instance) => instance,
            slot @ None => {
                let component = build(kind, engine, &self.config, &self.timings)?;
                let id = self.next_id;
                self.next_id += 1;
                debug!(%kind, id, "component instance created");
                slot.insert(Instance { id, component })
            }
        };
        Ok(instance.component.as_ref())
    }

    /// Destroy the instance of `kind`. Returns false if there was none.
    pub fn delete_instance(&mut self, kind: ComponentKind) -> bool {
        match self.slots[kind.index()].take() {
            Some(instance) => {
                debug!(%kind, id = instance.id, "component instance deleted");
                true
            }
            None => false,
        }
    }

    /// Destroy every live instance.
    pub fn delete_all(&mut self) {
        for kind in ComponentKind::ALL {
            self.delete_instance(kind);
        }
    }

    pub fn state(&self, kind: ComponentKind) -> InstanceState {
        if self.slots[kind.index()].is_some() {
            InstanceState::Active
        } else {
            InstanceState::Uninitialized
        }
    }

    pub fn is_active(&self, kind: ComponentKind) -> bool {
        self.state(kind) == InstanceState::Active
    }

    /// Identifier of the live instance; a new id is issued per construction.
    pub fn instance_id(&self, kind: ComponentKind) -> Option<u64> {
        self.slots[kind.index()].as_ref().map(|i| i.id)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new(ManagerConfig::default())
    }
}

fn build(
    kind: ComponentKind,
    engine: &dyn ModelEngine,
    config: &ManagerConfig,
    timings: &Arc<CallTimings>,
) -> ComponentResult<Box<dyn ModelComponent>> {
    let timings = Arc::clone(timings);
    Ok(match kind {
        ComponentKind::InverseDynamics => {
            Box::new(InverseDynamics::new(engine, config)?.with_timings(timings))
        }
        ComponentKind::JointLimits => Box::new(JointLimits::new(engine)?.with_timings(timings)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComponentError;
    use wbm_engine::{FrozenDynamicsModel, FrozenModelDescription};

    fn engine() -> FrozenDynamicsModel {
        let desc = FrozenModelDescription::zero_dynamics(&[(-1.0, 1.0), (-2.0, 2.0)]);
        FrozenDynamicsModel::from_description(&desc).unwrap()
    }

    #[test]
    fn lazy_creation_and_reuse() {
        let engine = engine();
        let mut registry = ComponentRegistry::default();
        assert_eq!(
            registry.state(ComponentKind::InverseDynamics),
            InstanceState::Uninitialized
        );

        let dof = registry
            .get_instance(ComponentKind::InverseDynamics, &engine)
            .unwrap()
            .dof();
        assert_eq!(dof, 2);
        let first = registry.instance_id(ComponentKind::InverseDynamics);

        registry
            .get_instance(ComponentKind::InverseDynamics, &engine)
            .unwrap();
        assert_eq!(registry.instance_id(ComponentKind::InverseDynamics), first);
        assert_eq!(registry.active_count(), 1);
    }

    #[test]
    fn delete_then_recreate_issues_new_id() {
        let engine = engine();
        let mut registry = ComponentRegistry::default();
        registry
            .get_instance(ComponentKind::JointLimits, &engine)
            .unwrap();
        let first = registry.instance_id(ComponentKind::JointLimits).unwrap();

        assert!(registry.delete_instance(ComponentKind::JointLimits));
        assert!(!registry.delete_instance(ComponentKind::JointLimits));
        assert!(!registry.is_active(ComponentKind::JointLimits));

        registry
            .get_instance(ComponentKind::JointLimits, &engine)
            .unwrap();
        let second = registry.instance_id(ComponentKind::JointLimits).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn failed_construction_leaves_slot_empty() {
        let engine = FrozenDynamicsModel::unloaded();
        let mut registry = ComponentRegistry::default();
        let err = registry
            .get_instance(ComponentKind::InverseDynamics, &engine)
            .err()
            .unwrap();
        assert!(matches!(err, ComponentError::EngineUnavailable { .. }));
        assert!(!registry.is_active(ComponentKind::InverseDynamics));
        assert_eq!(registry.instance_id(ComponentKind::InverseDynamics), None);
    }

    #[test]
    fn delete_all_clears_every_kind() {
        let engine = engine();
        let mut registry = ComponentRegistry::default();
        for kind in ComponentKind::ALL {
            registry.get_instance(kind, &engine).unwrap();
        }
        assert_eq!(registry.active_count(), 2);
        registry.delete_all();
        assert_eq!(registry.active_count(), 0);
    }
}
