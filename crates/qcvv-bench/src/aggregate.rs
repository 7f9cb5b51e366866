//! Aggregation of sampled probabilities into a result table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use qcvv_ir::GateRole;

use crate::error::{BenchError, BenchResult};
use crate::sample::{Sample, Variant};

/// Survival probability `2·P(0…0) − 1`.
///
/// Uniform depolarizing noise drives `P(0…0)` from 1 toward 1/2, so the
/// survival probability decays from 1 toward 0.
pub fn survival_probability(ground_state_probability: f64) -> f64 {
    2.0 * ground_state_probability - 1.0
}

/// One analysed sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Number of random Clifford elements.
    pub depth: usize,
    /// Number of Clifford operations in the circuit.
    pub circuit_size: usize,
    /// Experiment variant.
    pub variant: Variant,
    /// `2·P(0…0) − 1`.
    pub survival_prob: f64,
    /// Natural log of the survival probability; absent when it is not positive.
    pub log_survival_prob: Option<f64>,
}

impl ResultRow {
    /// Create a row, deriving the log survival probability.
    pub fn new(depth: usize, circuit_size: usize, variant: Variant, survival_prob: f64) -> Self {
        let log_survival_prob = (survival_prob > 0.0).then(|| survival_prob.ln());
        Self {
            depth,
            circuit_size,
            variant,
            survival_prob,
            log_survival_prob,
        }
    }

    /// Whether this row can enter a log-linear fit.
    pub fn is_usable(&self) -> bool {
        self.log_survival_prob.is_some()
    }
}

/// Rows of an analysed experiment, one per sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Build a table from rows.
    pub fn from_rows(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    /// All rows in sample order.
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    /// Append a row.
    pub fn push(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check whether any row belongs to `variant`.
    pub fn contains(&self, variant: Variant) -> bool {
        self.rows.iter().any(|r| r.variant == variant)
    }

    /// Rows belonging to `variant`.
    pub fn variant_rows(&self, variant: Variant) -> impl Iterator<Item = &ResultRow> {
        self.rows.iter().filter(move |r| r.variant == variant)
    }

    /// `(depth, log survival)` pairs of the usable rows of `variant`.
    ///
    /// Rows with non-positive survival probability are never returned.
    pub fn usable_points(&self, variant: Variant) -> Vec<(f64, f64)> {
        self.variant_rows(variant)
            .filter_map(|r| r.log_survival_prob.map(|log| (r.depth as f64, log)))
            .collect()
    }

    /// Distinct depths among the usable rows of `variant`.
    pub fn usable_depths(&self, variant: Variant) -> BTreeSet<usize> {
        self.variant_rows(variant)
            .filter(|r| r.is_usable())
            .map(|r| r.depth)
            .collect()
    }

    /// Mean survival probability per depth for `variant`, in depth order.
    pub fn mean_survival_by_depth(&self, variant: Variant) -> Vec<(usize, f64)> {
        let depths: BTreeSet<usize> = self.variant_rows(variant).map(|r| r.depth).collect();
        depths
            .into_iter()
            .map(|depth| {
                let values: Vec<f64> = self
                    .variant_rows(variant)
                    .filter(|r| r.depth == depth)
                    .map(|r| r.survival_prob)
                    .collect();
                (depth, values.iter().sum::<f64>() / values.len() as f64)
            })
            .collect()
    }
}

/// Check a sample's recorded depth and size against its circuit.
///
/// Batches read back from disk may have been edited by hand.
fn check_consistency(index: usize, sample: &Sample) -> BenchResult<()> {
    let inconsistent = |reason: String| BenchError::InconsistentSample { index, reason };
    let circuit = &sample.circuit;

    let random = circuit.count_role(GateRole::Random);
    if random != sample.depth {
        return Err(inconsistent(format!(
            "depth is {} but the circuit has {random} random elements",
            sample.depth
        )));
    }

    let expected_interleaved = match sample.variant {
        Variant::Plain => 0,
        Variant::Interleaved => sample.depth,
    };
    let interleaved = circuit.count_role(GateRole::Interleaved);
    if interleaved != expected_interleaved {
        return Err(inconsistent(format!(
            "{} sample has {interleaved} interleaved gates, expected {expected_interleaved}",
            sample.variant
        )));
    }

    let size = circuit.num_clifford_ops();
    if size != sample.circuit_size {
        return Err(inconsistent(format!(
            "circuit_size is {} but the circuit has {size} Clifford operations",
            sample.circuit_size
        )));
    }
    Ok(())
}

/// Turn sampled probabilities into one [`ResultRow`] per sample.
///
/// Every sample must carry a probability record satisfying the sampler
/// contract for `num_qubits` qubits, and its depth and size must match
/// its circuit.
pub fn aggregate(samples: &[Sample], num_qubits: u32) -> BenchResult<ResultTable> {
    let mut table = ResultTable::default();
    for (index, sample) in samples.iter().enumerate() {
        check_consistency(index, sample)?;
        let probabilities = sample
            .probabilities
            .as_ref()
            .ok_or(BenchError::MissingProbabilities { index })?;
        probabilities.validate(num_qubits)?;

        let survival = survival_probability(probabilities.ground_state(num_qubits));
        table.push(ResultRow::new(
            sample.depth,
            sample.circuit_size,
            sample.variant,
            survival,
        ));
    }
    tracing::debug!(rows = table.len(), "Aggregated sample probabilities");
    Ok(table)
}
