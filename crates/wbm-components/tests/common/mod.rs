//! Shared test doubles.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use wbm_components::HostArray;
use wbm_engine::{EngineError, EngineResult, ModelEngine, RobotState};

/// Handles shared between a test and the engine it hands to a manager.
#[derive(Clone, Default)]
pub struct Counters {
    pub dof: Arc<AtomicUsize>,
    pub loaded: Arc<AtomicBool>,
    pub dof_queries: Arc<AtomicUsize>,
    pub set_state_calls: Arc<AtomicUsize>,
    pub dynamics_calls: Arc<AtomicUsize>,
    pub limits_calls: Arc<AtomicUsize>,
}

impl Counters {
    pub fn dof_queries(&self) -> usize {
        self.dof_queries.load(Ordering::SeqCst)
    }

    pub fn set_state_calls(&self) -> usize {
        self.set_state_calls.load(Ordering::SeqCst)
    }

    pub fn dynamics_calls(&self) -> usize {
        self.dynamics_calls.load(Ordering::SeqCst)
    }

    pub fn limits_calls(&self) -> usize {
        self.limits_calls.load(Ordering::SeqCst)
    }

    pub fn set_dof(&self, dof: usize) {
        self.dof.store(dof, Ordering::SeqCst);
    }

    pub fn set_loaded(&self, loaded: bool) {
        self.loaded.store(loaded, Ordering::SeqCst);
    }
}

/// Zero-mass engine: `tau = qj_ddot`, limits `[-(i+1), i+1]`.
pub struct CountingEngine {
    counters: Counters,
    qj_ddot: Vec<f64>,
}

impl CountingEngine {
    pub fn new(dof: usize) -> (Self, Counters) {
        let counters = Counters::default();
        counters.set_dof(dof);
        counters.set_loaded(true);
        (
            Self {
                counters: counters.clone(),
                qj_ddot: Vec::new(),
            },
            counters,
        )
    }

    fn dof(&self) -> EngineResult<usize> {
        if !self.counters.loaded.load(Ordering::SeqCst) {
            return Err(EngineError::unavailable("counting engine unloaded"));
        }
        Ok(self.counters.dof.load(Ordering::SeqCst))
    }
}

impl ModelEngine for CountingEngine {
    fn name(&self) -> &str {
        "Counting"
    }

    fn degrees_of_freedom(&self) -> EngineResult<usize> {
        self.counters.dof_queries.fetch_add(1, Ordering::SeqCst);
        self.dof()
    }

    fn set_state(&mut self, state: &RobotState<'_>) -> EngineResult<()> {
        state.check_dimensions(self.dof()?)?;
        self.counters.set_state_calls.fetch_add(1, Ordering::SeqCst);
        self.qj_ddot = state.qj_ddot.to_vec();
        Ok(())
    }

    fn inverse_dynamics(&self, tau: &mut [f64]) -> EngineResult<()> {
        self.dof()?;
        if self.qj_ddot.len() != tau.len() {
            return Err(EngineError::StateNotSet);
        }
        self.counters.dynamics_calls.fetch_add(1, Ordering::SeqCst);
        tau.copy_from_slice(&self.qj_ddot);
        Ok(())
    }

    fn joint_limits(&self, lower: &mut [f64], upper: &mut [f64]) -> EngineResult<()> {
        self.dof()?;
        self.counters.limits_calls.fetch_add(1, Ordering::SeqCst);
        for (i, (lo, hi)) in lower.iter_mut().zip(upper.iter_mut()).enumerate() {
            *lo = -((i + 1) as f64);
            *hi = (i + 1) as f64;
        }
        Ok(())
    }
}

/// Six column inputs for a `dof`-joint model with the given accelerations.
pub fn state_inputs(qj_ddot: &[f64]) -> Vec<HostArray> {
    let dof = qj_ddot.len();
    vec![
        HostArray::column(vec![0.0; dof]),
        HostArray::column(vec![0.0; dof]),
        HostArray::column(qj_ddot.to_vec()),
        HostArray::column(vec![0.0; 6]),
        HostArray::column(vec![0.0; 6]),
        HostArray::column(vec![0.0, 0.0, -9.81]),
    ]
}
