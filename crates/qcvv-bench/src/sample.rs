//! Experiment samples: a built circuit plus its bookkeeping.

use serde::{Deserialize, Serialize};
use std::fmt;

use qcvv_ir::Circuit;

use crate::sampler::ProbabilityRecord;

/// Which half of an interleaved benchmarking experiment a circuit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Variant {
    /// Random sequence followed by its inverse.
    #[serde(rename = "RB")]
    Plain,
    /// Random sequence with the gate under test after each element.
    #[serde(rename = "IRB")]
    Interleaved,
}

impl Variant {
    /// Short label used in circuit names and tables.
    pub fn label(self) -> &'static str {
        match self {
            Variant::Plain => "RB",
            Variant::Interleaved => "IRB",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One benchmarking circuit with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// The circuit, terminated by measurement.
    pub circuit: Circuit,
    /// Number of random Clifford elements in the base sequence.
    pub depth: usize,
    /// Experiment variant.
    pub variant: Variant,
    /// Number of Clifford operations before measurement.
    pub circuit_size: usize,
    /// Measured outcome distribution, once sampled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probabilities: Option<ProbabilityRecord>,
}

impl Sample {
    /// Create an unsampled sample; the size is read off the circuit.
    pub fn new(circuit: Circuit, depth: usize, variant: Variant) -> Self {
        let circuit_size = circuit.num_clifford_ops();
        Self {
            circuit,
            depth,
            variant,
            circuit_size,
            probabilities: None,
        }
    }

    /// Check whether probabilities have been attached.
    pub fn is_sampled(&self) -> bool {
        self.probabilities.is_some()
    }
}
