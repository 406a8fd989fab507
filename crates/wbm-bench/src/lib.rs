//! Benchmark framework comparing the safe and fast component paths.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;
use wbm_components::{ComponentError, ComponentKind, ComponentManager, HostArray, ManagerConfig};
use wbm_engine::{EngineError, FrozenDynamicsModel, FrozenModelDescription};

pub type BenchResult<T> = Result<T, BenchError>;

#[derive(thiserror::Error, Debug)]
pub enum BenchError {
    #[error("Benchmark setup failed: {0}")]
    Setup(#[from] EngineError),

    #[error("{path} call failed: {source}")]
    Call {
        path: &'static str,
        source: ComponentError,
    },

    #[error("{path} call failed without an error")]
    Silent { path: &'static str },
}

/// A benchmark scenario definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkScenario {
    /// Unique identifier for this benchmark.
    pub id: String,
    /// Model degrees of freedom.
    pub dof: usize,
    /// Timed calls per path.
    pub iterations: usize,
}

/// Per-call statistics for one path, in nanoseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PathMetrics {
    pub calls: usize,
    pub median_ns: f64,
    pub min_ns: f64,
    pub max_ns: f64,
}

impl PathMetrics {
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self {
            calls: sorted.len(),
            median_ns: sorted[sorted.len() / 2],
            min_ns: sorted[0],
            max_ns: sorted[sorted.len() - 1],
        }
    }
}

/// Complete benchmark result for a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub scenario: BenchmarkScenario,
    pub compute: PathMetrics,
    pub compute_fast: PathMetrics,
    /// Per-stage breakdown, present when call timing was enabled.
    pub call_breakdown: Option<String>,
}

impl BenchmarkResult {
    /// Median safe-path time over median fast-path time.
    pub fn speedup(&self) -> Option<f64> {
        (self.compute_fast.median_ns > 0.0)
            .then(|| self.compute.median_ns / self.compute_fast.median_ns)
    }
}

/// Collection of benchmark results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSuite {
    pub timestamp: String,
    pub results: Vec<BenchmarkResult>,
}

impl BenchmarkSuite {
    pub fn new(results: Vec<BenchmarkResult>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            results,
        }
    }
}

/// Model sizes from a single arm up to a full humanoid.
pub fn default_benchmarks(iterations: usize) -> Vec<BenchmarkScenario> {
    [7, 12, 23, 32]
        .into_iter()
        .map(|dof| BenchmarkScenario {
            id: format!("inverse_dynamics_dof{dof}"),
            dof,
            iterations,
        })
        .collect()
}

/// Banded, diagonally dominant model of the given size.
pub fn synthetic_description(dof: usize) -> FrozenModelDescription {
    let limits: Vec<(f64, f64)> = (0..dof).map(|_| (-1.5, 1.5)).collect();
    let mut desc = FrozenModelDescription::zero_dynamics(&limits);
    desc.name = format!("synthetic-{dof}");
    let banded = |diag: f64, off: f64| -> Vec<Vec<f64>> {
        (0..dof)
            .map(|i| {
                (0..dof)
                    .map(|j| match i.abs_diff(j) {
                        0 => diag,
                        1 => off,
                        _ => 0.0,
                    })
                    .collect()
            })
            .collect()
    };
    desc.mass = banded(2.0, 0.3);
    desc.damping = banded(0.5, 0.0);
    desc.stiffness = banded(1.0, 0.1);
    desc.base_acceleration_coupling = vec![vec![0.05; 6]; dof];
    desc.base_velocity_coupling = vec![vec![0.01; 6]; dof];
    desc.gravity_coupling = vec![vec![0.0, 0.0, 0.8]; dof];
    desc
}

fn state_inputs(dof: usize) -> Vec<HostArray> {
    let ramp = |scale: f64| HostArray::column((0..dof).map(|i| scale * i as f64).collect());
    vec![
        ramp(0.01),
        ramp(0.1),
        ramp(0.5),
        HostArray::column(vec![0.1, 0.0, 0.0, 0.0, 0.0, 0.2]),
        HostArray::column(vec![0.0; 6]),
        HostArray::column(vec![0.0, 0.0, -9.81]),
    ]
}

fn time_path(
    manager: &mut ComponentManager,
    inputs: &[HostArray],
    outputs: &mut [Option<HostArray>],
    iterations: usize,
    fast: bool,
) -> BenchResult<PathMetrics> {
    let path = if fast { "compute_fast" } else { "compute" };
    let mut samples = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let start = Instant::now();
        let ok = if fast {
            manager.compute_fast(ComponentKind::InverseDynamics, inputs.len(), inputs, outputs)
        } else {
            manager.compute(ComponentKind::InverseDynamics, inputs.len(), inputs, outputs)
        };
        samples.push(start.elapsed().as_nanos() as f64);
        if !ok {
            return Err(match manager.last_error() {
                Some(err) => BenchError::Call {
                    path,
                    source: err.clone(),
                },
                None => BenchError::Silent { path },
            });
        }
    }
    Ok(PathMetrics::from_samples(&samples))
}

/// Time both inverse dynamics paths for one scenario.
pub fn run_scenario(
    scenario: &BenchmarkScenario,
    config: &ManagerConfig,
) -> BenchResult<BenchmarkResult> {
    let engine = FrozenDynamicsModel::from_description(&synthetic_description(scenario.dof))?;
    let mut manager = ComponentManager::new(Box::new(engine), config.clone());

    let mut outputs: Vec<Option<HostArray>> = vec![None];
    if !manager.allocate_return_space(ComponentKind::InverseDynamics, 1, &mut outputs) {
        return Err(match manager.last_error() {
            Some(err) => BenchError::Call {
                path: "allocate_return_space",
                source: err.clone(),
            },
            None => BenchError::Silent {
                path: "allocate_return_space",
            },
        });
    }

    let inputs = state_inputs(scenario.dof);
    let compute = time_path(&mut manager, &inputs, &mut outputs, scenario.iterations, false)?;
    let compute_fast = time_path(&mut manager, &inputs, &mut outputs, scenario.iterations, true)?;
    info!(
        id = %scenario.id,
        compute_ns = compute.median_ns,
        compute_fast_ns = compute_fast.median_ns,
        "scenario finished"
    );
    let call_breakdown = config.timing.then(|| manager.timing_summary());
    manager.shutdown();

    Ok(BenchmarkResult {
        scenario: scenario.clone(),
        compute,
        compute_fast,
        call_breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_from_samples() {
        let metrics = PathMetrics::from_samples(&[30.0, 10.0, 20.0]);
        assert_eq!(metrics.calls, 3);
        assert_eq!(metrics.median_ns, 20.0);
        assert_eq!(metrics.min_ns, 10.0);
        assert_eq!(metrics.max_ns, 30.0);
    }

    #[test]
    fn metrics_handle_empty_samples() {
        assert_eq!(PathMetrics::from_samples(&[]), PathMetrics::default());
    }

    #[test]
    fn synthetic_model_is_valid() {
        for scenario in default_benchmarks(1) {
            synthetic_description(scenario.dof).validate().unwrap();
        }
    }

    #[test]
    fn run_small_scenario() {
        let scenario = BenchmarkScenario {
            id: "small".to_string(),
            dof: 4,
            iterations: 8,
        };
        let result = run_scenario(&scenario, &ManagerConfig::default()).unwrap();
        assert_eq!(result.compute.calls, 8);
        assert_eq!(result.compute_fast.calls, 8);
        assert!(result.compute.min_ns <= result.compute.max_ns);
        assert!(result.call_breakdown.is_none());
    }

    #[test]
    fn timed_scenario_reports_breakdown() {
        let scenario = BenchmarkScenario {
            id: "timed".to_string(),
            dof: 3,
            iterations: 4,
        };
        let config = ManagerConfig {
            timing: true,
            ..ManagerConfig::default()
        };
        let result = run_scenario(&scenario, &config).unwrap();
        let breakdown = result.call_breakdown.unwrap();
        assert!(breakdown.contains("compute_fast"));
        assert!(breakdown.contains("engine query"));
    }

    #[test]
    fn zero_dof_scenario_fails_setup() {
        let scenario = BenchmarkScenario {
            id: "empty".to_string(),
            dof: 0,
            iterations: 1,
        };
        assert!(matches!(
            run_scenario(&scenario, &ManagerConfig::default()),
            Err(BenchError::Setup(_))
        ));
    }

    #[test]
    fn benchmark_suite_serializes() {
        let suite = BenchmarkSuite::new(vec![]);
        let json = serde_json::to_string(&suite).expect("should serialize");
        let deserialized: BenchmarkSuite = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(deserialized.timestamp, suite.timestamp);
        assert!(deserialized.results.is_empty());
    }
}
