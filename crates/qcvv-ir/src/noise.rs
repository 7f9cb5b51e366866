//! Noise channel types.
//!
//! Only the channels that matter for single-qubit randomized benchmarking
//! are modelled: gate depolarization and symmetric readout error.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// A noise channel model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum NoiseModel {
    /// Depolarizing channel: with probability `p`, replaces the state
    /// with the maximally mixed state.
    Depolarizing {
        /// Error probability (0.0 to 1.0).
        p: f64,
    },

    /// Readout error: measurement reports the wrong outcome with probability `p`.
    ReadoutError {
        /// Misclassification probability (0.0 to 1.0).
        p: f64,
    },
}

impl NoiseModel {
    /// Get a human-readable name for this noise model.
    pub fn name(&self) -> &str {
        match self {
            NoiseModel::Depolarizing { .. } => "depolarizing",
            NoiseModel::ReadoutError { .. } => "readout_error",
        }
    }

    /// Get the primary error parameter of this noise model.
    pub fn error_param(&self) -> f64 {
        match self {
            NoiseModel::Depolarizing { p } | NoiseModel::ReadoutError { p } => *p,
        }
    }

    /// Check that the error parameter is a probability.
    pub fn validate(&self) -> IrResult<()> {
        let p = self.error_param();
        if !(0.0..=1.0).contains(&p) {
            return Err(IrError::InvalidNoiseParameter {
                model: self.name().to_string(),
                value: p,
            });
        }
        Ok(())
    }

    /// Factor by which the Bloch vector length shrinks under this channel.
    ///
    /// Readout error acts on classical outcomes, not on the state.
    pub fn bloch_contraction(&self) -> f64 {
        match self {
            NoiseModel::Depolarizing { p } => 1.0 - p,
            NoiseModel::ReadoutError { .. } => 1.0,
        }
    }
}

impl fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoiseModel::Depolarizing { p } => write!(f, "depolarizing(p={p:.4})"),
            NoiseModel::ReadoutError { p } => write!(f, "readout_error(p={p:.4})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_model_names() {
        assert_eq!(NoiseModel::Depolarizing { p: 0.01 }.name(), "depolarizing");
        assert_eq!(NoiseModel::ReadoutError { p: 0.05 }.name(), "readout_error");
    }

    #[test]
    fn test_noise_model_display() {
        let m = NoiseModel::Depolarizing { p: 0.03 };
        assert_eq!(format!("{m}"), "depolarizing(p=0.0300)");
    }

    #[test]
    fn test_validate() {
        assert!(NoiseModel::Depolarizing { p: 0.0 }.validate().is_ok());
        assert!(NoiseModel::ReadoutError { p: 1.0 }.validate().is_ok());
        assert!(NoiseModel::Depolarizing { p: -0.1 }.validate().is_err());
        assert!(NoiseModel::ReadoutError { p: f64::NAN }.validate().is_err());
    }

    #[test]
    fn test_bloch_contraction() {
        assert!((NoiseModel::Depolarizing { p: 0.02 }.bloch_contraction() - 0.98).abs() < 1e-12);
        assert_eq!(NoiseModel::ReadoutError { p: 0.1 }.bloch_contraction(), 1.0);
    }

    #[test]
    fn test_serialization() {
        let m = NoiseModel::Depolarizing { p: 0.01 };
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"model":"depolarizing","p":0.01}"#);
        let back: NoiseModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
