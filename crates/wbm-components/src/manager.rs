//! Host boundary: boolean component operations over an owned engine.
//!
//! `ComponentManager` is the only place where `ComponentResult` collapses into
//! the `bool` the host sees. The error of the most recent call is kept in
//! `last_error()` and logged with `warn!`.

use tracing::{debug, warn};
use wbm_core::timing::CallTimings;
use wbm_engine::ModelEngine;

use crate::buffer::HostArray;
use crate::common::check_arity;
use crate::config::ManagerConfig;
use crate::error::{ComponentError, ComponentResult};
use crate::registry::ComponentRegistry;
use crate::traits::ComponentKind;

pub struct ComponentManager {
    engine: Box<dyn ModelEngine>,
    registry: ComponentRegistry,
    config: ManagerConfig,
    last_error: Option<ComponentError>,
}

impl ComponentManager {
    pub fn new(engine: Box<dyn ModelEngine>, config: ManagerConfig) -> Self {
        debug!(engine = engine.name(), ?config, "component manager created");
        Self {
            engine,
            registry: ComponentRegistry::new(config.clone()),
            config,
            last_error: None,
        }
    }

    pub fn with_defaults(engine: Box<dyn ModelEngine>) -> Self {
        Self::new(engine, ManagerConfig::default())
    }

    /// Bind one DoF-sized buffer per declared output of `kind`.
    ///
    /// `output_count` is the number of slots the caller declares; it must
    /// match both `outputs.len()` and the component's output arity.
    pub fn allocate_return_space(
        &mut self,
        kind: ComponentKind,
        output_count: usize,
        outputs: &mut [Option<HostArray>],
    ) -> bool {
        let timer = self.registry.timings().timer();
        let result = self.try_allocate(kind, output_count, outputs);
        timer.stop_into(&self.registry.timings().allocate);
        self.finish(kind, "allocate_return_space", result)
    }

    /// Validated compute. Outputs must have been allocated first.
    pub fn compute(
        &mut self,
        kind: ComponentKind,
        input_count: usize,
        inputs: &[HostArray],
        outputs: &mut [Option<HostArray>],
    ) -> bool {
        let timer = self.registry.timings().timer();
        let result = self.try_compute(kind, input_count, inputs, outputs, false);
        timer.stop_into(&self.registry.timings().compute);
        self.finish(kind, "compute", result)
    }

    /// Unvalidated compute: only arity and DoF guards run before the engine.
    pub fn compute_fast(
        &mut self,
        kind: ComponentKind,
        input_count: usize,
        inputs: &[HostArray],
        outputs: &mut [Option<HostArray>],
    ) -> bool {
        let timer = self.registry.timings().timer();
        let result = self.try_compute(kind, input_count, inputs, outputs, true);
        timer.stop_into(&self.registry.timings().compute_fast);
        self.finish(kind, "compute_fast", result)
    }

    /// Resolve `name`, allocate its outputs and run the safe path.
    ///
    /// Returns `None` on failure; see `last_error()`.
    pub fn call(&mut self, name: &str, inputs: &[HostArray]) -> Option<Vec<HostArray>> {
        self.dispatch(name, inputs, false)
    }

    /// Like `call`, but runs the fast path.
    pub fn call_fast(&mut self, name: &str, inputs: &[HostArray]) -> Option<Vec<HostArray>> {
        self.dispatch(name, inputs, true)
    }

    /// Destroy the instance of `kind`. Returns false if none was live.
    pub fn delete_instance(&mut self, kind: ComponentKind) -> bool {
        self.registry.delete_instance(kind)
    }

    /// Destroy every instance, as when the host unloads the extension.
    pub fn shutdown(&mut self) {
        self.registry.delete_all();
        debug!("component manager shut down");
    }

    /// Swap the engine, returning the previous one.
    ///
    /// Live instances are kept; if the new model has a different DoF their
    /// next call fails with `DofChanged` until they are deleted.
    pub fn replace_engine(&mut self, engine: Box<dyn ModelEngine>) -> Box<dyn ModelEngine> {
        debug!(engine = engine.name(), "model engine replaced");
        std::mem::replace(&mut self.engine, engine)
    }

    pub fn engine(&self) -> &dyn ModelEngine {
        &*self.engine
    }

    pub fn engine_mut(&mut self) -> &mut dyn ModelEngine {
        &mut *self.engine
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    pub fn is_active(&self, kind: ComponentKind) -> bool {
        self.registry.is_active(kind)
    }

    pub fn instance_id(&self, kind: ComponentKind) -> Option<u64> {
        self.registry.instance_id(kind)
    }

    /// Error of the most recent operation, or `None` if it succeeded.
    pub fn last_error(&self) -> Option<&ComponentError> {
        self.last_error.as_ref()
    }

    /// Calls recorded by this manager; empty unless `config.timing` is set.
    pub fn timings(&self) -> &CallTimings {
        self.registry.timings()
    }

    pub fn timing_summary(&self) -> String {
        self.registry.timings().summary()
    }

    fn try_allocate(
        &mut self,
        kind: ComponentKind,
        output_count: usize,
        outputs: &mut [Option<HostArray>],
    ) -> ComponentResult<()> {
        check_arity("declared outputs", output_count, outputs.len())?;
        let component = self.registry.get_instance(kind, &*self.engine)?;
        component.allocate_return_space(&*self.engine, outputs)?;
        debug!(%kind, slots = outputs.len(), "return space allocated");
        Ok(())
    }

    fn try_compute(
        &mut self,
        kind: ComponentKind,
        input_count: usize,
        inputs: &[HostArray],
        outputs: &mut [Option<HostArray>],
        fast: bool,
    ) -> ComponentResult<()> {
        check_arity("declared inputs", input_count, inputs.len())?;
        let component = self.registry.get_instance(kind, &*self.engine)?;
        if fast {
            component.compute_fast(&mut *self.engine, inputs, outputs)
        } else {
            component.compute(&mut *self.engine, inputs, outputs)
        }
    }

    fn dispatch(&mut self, name: &str, inputs: &[HostArray], fast: bool) -> Option<Vec<HostArray>> {
        let kind = match name.parse::<ComponentKind>() {
            Ok(kind) => kind,
            Err(err) => {
                warn!(name, error = %err, "component dispatch failed");
                self.last_error = Some(err);
                return None;
            }
        };

        let mut outputs: Vec<Option<HostArray>> = vec![None; kind.num_outputs()];
        if !self.allocate_return_space(kind, outputs.len(), &mut outputs) {
            return None;
        }
        let ok = if fast {
            self.compute_fast(kind, inputs.len(), inputs, &mut outputs)
        } else {
            self.compute(kind, inputs.len(), inputs, &mut outputs)
        };
        if !ok {
            return None;
        }
        outputs.into_iter().collect()
    }

    fn finish(&mut self, kind: ComponentKind, op: &'static str, result: ComponentResult<()>) -> bool {
        match result {
            Ok(()) => {
                self.last_error = None;
                true
            }
            Err(err) => {
                warn!(%kind, op, error = %err, "component call failed");
                self.last_error = Some(err);
                false
            }
        }
    }
}
