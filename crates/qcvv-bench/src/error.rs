//! Error types for the benchmarking pipeline.

use qcvv_ir::IrError;
use thiserror::Error;

use crate::sample::Variant;

/// Errors that can occur while building, sampling or analysing an experiment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BenchError {
    /// The experiment was configured with parameters the pipeline does not support.
    #[error("Unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// A Clifford sequence reduction was given no elements.
    #[error("Cannot reduce an empty Clifford sequence")]
    EmptySequence,

    /// Too few usable rows remain to fit a decay.
    #[error(
        "Cannot fit {variant} decay: {usable} usable rows over {distinct_depths} distinct depths, \
         need at least {required} of each"
    )]
    InsufficientData {
        /// The experiment variant that could not be fitted.
        variant: Variant,
        /// Rows with positive survival probability.
        usable: usize,
        /// Distinct depths among the usable rows.
        distinct_depths: usize,
        /// Minimum required rows and distinct depths.
        required: usize,
    },

    /// A probability record violates the sampler contract.
    #[error("Invalid probability record: {0}")]
    InvalidProbabilities(String),

    /// A sample reached analysis without sampled probabilities.
    #[error("Sample {index} has no probabilities; run a sampler first")]
    MissingProbabilities {
        /// Position of the sample in the batch.
        index: usize,
    },

    /// A sample's recorded depth or size disagrees with its circuit.
    #[error("Sample {index} is inconsistent with its circuit: {reason}")]
    InconsistentSample {
        /// Position of the sample in the batch.
        index: usize,
        /// Which field disagrees.
        reason: String,
    },

    /// The sampler failed to execute a circuit.
    #[error("Sampler '{sampler}' failed: {message}")]
    Sampler {
        /// Sampler name.
        sampler: String,
        /// Failure description.
        message: String,
    },

    /// Circuit construction failed.
    #[error(transparent)]
    Ir(#[from] IrError),
}

/// Result type for benchmarking operations.
pub type BenchResult<T> = Result<T, BenchError>;
