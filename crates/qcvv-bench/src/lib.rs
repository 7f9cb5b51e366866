//! Randomized benchmarking for single-qubit Clifford gates.
//!
//! Implements the interleaved randomized benchmarking (IRB) pipeline:
//! - **Generation**: uniformly random single-qubit Cliffords
//! - **Building**: RB and IRB circuits that compose to the identity
//! - **Sampling**: a [`Sampler`] seam for whatever executes the circuits
//! - **Analysis**: survival probabilities, log-linear decay fits and gate-error estimates
//!
//! # Example
//!
//! ```rust
//! use qcvv_bench::IrbExperiment;
//! use qcvv_ir::Clifford;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let experiment = IrbExperiment::interleaved(Clifford::X);
//! let mut rng = StdRng::seed_from_u64(42);
//! let samples = experiment.build_circuits(5, &[1, 4, 16], &mut rng).unwrap();
//!
//! // One RB and one IRB circuit per trial and depth.
//! assert_eq!(samples.len(), 5 * 3 * 2);
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod fit;
pub mod generator;
pub mod irb;
pub mod results;
pub mod sample;
pub mod sampler;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use aggregate::{ResultRow, ResultTable, aggregate, survival_probability};
pub use config::{ConfigError, ExperimentConfig, SimulatorConfig};
pub use error::{BenchError, BenchResult};
pub use fit::{DecayFit, LinearFit, fit_decay, linear_regression};
pub use generator::{random_clifford, random_sequence, reduce};
pub use irb::{ExperimentRun, IrbExperiment, SampleBatch};
pub use results::{AnalysisResult, IrbResults, RbResults, fit_and_estimate};
pub use sample::{Sample, Variant};
pub use sampler::{ProbabilityRecord, Sampler};

/// Result of a benchmark run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Name of the benchmark.
    pub name: String,
    /// Primary metric value.
    pub value: f64,
    /// Unit of the primary metric.
    pub unit: String,
    /// Total wall-clock time.
    pub duration: Duration,
    /// Additional metrics.
    pub metrics: serde_json::Map<String, serde_json::Value>,
}

impl BenchmarkResult {
    /// Create a new benchmark result.
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
            duration: Duration::ZERO,
            metrics: serde_json::Map::new(),
        }
    }

    /// Set the duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add a metric.
    pub fn with_metric(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metrics.insert(key.into(), value.into());
        self
    }

    /// Look up a numeric metric.
    pub fn metric_f64(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).and_then(serde_json::Value::as_f64)
    }
}
