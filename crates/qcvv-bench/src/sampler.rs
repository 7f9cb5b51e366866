//! The sampler seam: executing circuits and reading back outcome distributions.
//!
//! Hardware and cloud clients implement [`Sampler`]; the pipeline only ever
//! sees the returned [`ProbabilityRecord`]. Retry and backoff are the
//! implementor's concern.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use qcvv_ir::Circuit;

use crate::error::{BenchError, BenchResult};

/// Allowed deviation of a record's total probability from 1.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-4;

/// Outcome distribution of one circuit, keyed by bitstring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProbabilityRecord(BTreeMap<String, f64>);

impl ProbabilityRecord {
    /// Wrap a bitstring-to-probability map.
    pub fn new(probabilities: BTreeMap<String, f64>) -> Self {
        Self(probabilities)
    }

    /// Normalise raw shot counts into probabilities.
    pub fn from_counts(counts: &BTreeMap<String, u64>) -> BenchResult<Self> {
        let total: u64 = counts.values().sum();
        if total == 0 {
            return Err(BenchError::InvalidProbabilities(
                "counts contain no shots".to_string(),
            ));
        }
        Ok(Self(
            counts
                .iter()
                .map(|(bits, &count)| (bits.clone(), count as f64 / total as f64))
                .collect(),
        ))
    }

    /// Probability of a bitstring; absent outcomes have probability 0.
    pub fn get(&self, bitstring: &str) -> f64 {
        self.0.get(bitstring).copied().unwrap_or(0.0)
    }

    /// Probability of the all-zeros outcome on `num_qubits` qubits.
    pub fn ground_state(&self, num_qubits: u32) -> f64 {
        self.get(&"0".repeat(num_qubits as usize))
    }

    /// Sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Iterate over `(bitstring, probability)` pairs in bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of recorded outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether no outcome is recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check the sampler contract for a `num_qubits`-qubit circuit.
    pub fn validate(&self, num_qubits: u32) -> BenchResult<()> {
        for (bits, p) in self.iter() {
            if bits.len() != num_qubits as usize || !bits.chars().all(|c| c == '0' || c == '1') {
                return Err(BenchError::InvalidProbabilities(format!(
                    "key '{bits}' is not a {num_qubits}-bit string"
                )));
            }
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(BenchError::InvalidProbabilities(format!(
                    "probability {p} for '{bits}' is outside [0, 1]"
                )));
            }
        }
        let total = self.total();
        if (total - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(BenchError::InvalidProbabilities(format!(
                "probabilities sum to {total}, expected 1"
            )));
        }
        Ok(())
    }
}

impl FromIterator<(String, f64)> for ProbabilityRecord {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Executes circuits and returns their outcome distributions.
pub trait Sampler {
    /// Name of the backend, recorded as the target of an analysis.
    fn name(&self) -> &str;

    /// Execute one circuit.
    fn sample(&mut self, circuit: &Circuit) -> BenchResult<ProbabilityRecord>;
}

impl<S: Sampler + ?Sized> Sampler for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn sample(&mut self, circuit: &Circuit) -> BenchResult<ProbabilityRecord> {
        (**self).sample(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, f64)]) -> ProbabilityRecord {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_from_counts() {
        let counts = BTreeMap::from([("0".to_string(), 750), ("1".to_string(), 250)]);
        let probs = ProbabilityRecord::from_counts(&counts).unwrap();
        assert!((probs.get("0") - 0.75).abs() < 1e-12);
        assert!((probs.total() - 1.0).abs() < 1e-12);
        assert!(ProbabilityRecord::from_counts(&BTreeMap::new()).is_err());
    }

    #[test]
    fn test_ground_state_defaults_to_zero() {
        let probs = record(&[("1", 1.0)]);
        assert_eq!(probs.ground_state(1), 0.0);
        let probs = record(&[("00", 0.4), ("11", 0.6)]);
        assert!((probs.ground_state(2) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(record(&[("0", 0.5), ("1", 0.5)]).validate(1).is_ok());
        assert!(record(&[("00", 1.0)]).validate(1).is_err());
        assert!(record(&[("2", 1.0)]).validate(1).is_err());
        assert!(record(&[("0", 1.2), ("1", -0.2)]).validate(1).is_err());
        assert!(record(&[("0", 0.5)]).validate(1).is_err());
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let probs = record(&[("0", 0.75), ("1", 0.25)]);
        let json = serde_json::to_string(&probs).unwrap();
        assert_eq!(json, r#"{"0":0.75,"1":0.25}"#);
    }
}
