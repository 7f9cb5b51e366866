//! Experiment configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with QCVV_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values
//!
//! Command-line flags are applied on top by the caller.

use serde::{Deserialize, Serialize};
use std::path::Path;

use qcvv_ir::{Clifford, NoiseModel};

use crate::irb::IrbExperiment;

/// Complete experiment configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Number of qubits benchmarked. Only 1 is supported.
    #[serde(default = "default_num_qubits")]
    pub num_qubits: u32,

    /// Random sequences drawn per depth
    #[serde(default = "default_num_circuits")]
    pub num_circuits: usize,

    /// Sequence lengths
    #[serde(default = "default_depths")]
    pub depths: Vec<usize>,

    /// Gate under test; `null` or "none" runs standard RB
    #[serde(default = "default_interleaved_gate")]
    pub interleaved_gate: Option<String>,

    /// Seed for circuit generation and shot sampling
    #[serde(default)]
    pub seed: Option<u64>,

    /// Local simulator settings
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

/// Noise and sampling settings for the local simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Shots per circuit; exact probabilities when unset
    #[serde(default)]
    pub shots: Option<u64>,

    /// Depolarizing probability after every Clifford operation
    #[serde(default = "default_depolarizing")]
    pub depolarizing: f64,

    /// Extra depolarizing probability after each interleaved gate
    #[serde(default = "default_interleaved_depolarizing")]
    pub interleaved_depolarizing: f64,

    /// Probability of flipping a measured bit
    #[serde(default)]
    pub readout_error: f64,
}

// Default value functions
fn default_num_qubits() -> u32 {
    1
}

fn default_num_circuits() -> usize {
    10
}

fn default_depths() -> Vec<usize> {
    vec![1, 5, 10, 20, 50]
}

fn default_interleaved_gate() -> Option<String> {
    Some("Z".to_string())
}

fn default_depolarizing() -> f64 {
    0.005
}

fn default_interleaved_depolarizing() -> f64 {
    0.01
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            num_qubits: default_num_qubits(),
            num_circuits: default_num_circuits(),
            depths: default_depths(),
            interleaved_gate: default_interleaved_gate(),
            seed: None,
            simulator: SimulatorConfig::default(),
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            shots: None,
            depolarizing: default_depolarizing(),
            interleaved_depolarizing: default_interleaved_depolarizing(),
            readout_error: 0.0,
        }
    }
}

impl SimulatorConfig {
    /// The configured channels as noise models.
    pub fn noise_models(&self) -> [NoiseModel; 3] {
        [
            NoiseModel::Depolarizing {
                p: self.depolarizing,
            },
            NoiseModel::Depolarizing {
                p: self.interleaved_depolarizing,
            },
            NoiseModel::ReadoutError {
                p: self.readout_error,
            },
        ]
    }
}

impl ExperimentConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config = Self::parse_yaml(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn read_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::parse_yaml(&contents)
    }

    fn parse_yaml(contents: &str) -> Result<Self, ConfigError> {
        serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let config = Self::load_unvalidated(config_file)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`ExperimentConfig::load`], but leaves validation to the caller.
    ///
    /// Callers that apply further overrides (command-line flags) validate
    /// once the final values are in place.
    pub fn load_unvalidated(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_file {
            Self::read_file(path)?
        } else {
            ExperimentConfig::default()
        };
        config.merge_env()
    }

    /// Merge `QCVV_*` environment variables into this configuration.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_env_with(|key| std::env::var(key).ok())
    }

    /// Merge overrides read through `lookup`.
    ///
    /// Only keys that `lookup` returns override the current values.
    pub fn merge_env_with<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QCVV_NUM_CIRCUITS") {
            self.num_circuits = parse_var("QCVV_NUM_CIRCUITS", &v)?;
        }
        if let Some(v) = lookup("QCVV_DEPTHS") {
            self.depths = parse_depths(&v)
                .ok_or_else(|| ConfigError::ValidationError(format!("Invalid QCVV_DEPTHS: {v}")))?;
        }
        if let Some(v) = lookup("QCVV_INTERLEAVED_GATE") {
            self.interleaved_gate = Some(v);
        }
        if let Some(v) = lookup("QCVV_SEED") {
            self.seed = Some(parse_var("QCVV_SEED", &v)?);
        }
        if let Some(v) = lookup("QCVV_SHOTS") {
            self.simulator.shots = Some(parse_var("QCVV_SHOTS", &v)?);
        }
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_qubits != 1 {
            return Err(ConfigError::ValidationError(format!(
                "num_qubits must be 1, got {}",
                self.num_qubits
            )));
        }

        if self.num_circuits == 0 {
            return Err(ConfigError::ValidationError(
                "num_circuits must be greater than 0".to_string(),
            ));
        }

        if self.depths.is_empty() {
            return Err(ConfigError::ValidationError(
                "depths must not be empty".to_string(),
            ));
        }

        self.interleaved_clifford()?;

        for model in self.simulator.noise_models() {
            model
                .validate()
                .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        }

        if self.simulator.shots == Some(0) {
            return Err(ConfigError::ValidationError(
                "shots must be greater than 0; omit the field for exact probabilities"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// The gate under test, or `None` for standard RB.
    pub fn interleaved_clifford(&self) -> Result<Option<Clifford>, ConfigError> {
        match self.interleaved_gate.as_deref().map(str::trim) {
            None => Ok(None),
            Some(name) if name.is_empty() || name.eq_ignore_ascii_case("none") => Ok(None),
            Some(name) => name
                .parse::<Clifford>()
                .map(Some)
                .map_err(|e| ConfigError::ValidationError(e.to_string())),
        }
    }

    /// Build the experiment this configuration describes.
    pub fn experiment(&self) -> Result<IrbExperiment, ConfigError> {
        let gate = self.interleaved_clifford()?;
        IrbExperiment::new(self.num_qubits, gate)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml_ng::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::ValidationError(format!("Invalid {key}: {value}")))
}

/// Parse a comma-separated depth list such as `1,5,10`.
pub fn parse_depths(value: &str) -> Option<Vec<usize>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().ok())
        .collect()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    IoError(String),

    /// The configuration file is not valid YAML for this schema.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A value is out of range or unknown.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ExperimentConfig::default();
        assert_eq!(config.num_qubits, 1);
        assert_eq!(config.num_circuits, 10);
        assert_eq!(config.depths, vec![1, 5, 10, 20, 50]);
        assert_eq!(config.interleaved_clifford().unwrap(), Some(Clifford::Z));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = ExperimentConfig::from_yaml_str(
            "num_circuits: 3\ndepths: [2, 4]\nsimulator:\n  shots: 500\n",
        )
        .unwrap();
        assert_eq!(config.num_circuits, 3);
        assert_eq!(config.depths, vec![2, 4]);
        assert_eq!(config.simulator.shots, Some(500));
        assert_eq!(config.simulator.depolarizing, 0.005);
        assert_eq!(config.interleaved_gate.as_deref(), Some("Z"));
    }

    #[test]
    fn test_null_or_none_disables_interleaving() {
        let config = ExperimentConfig::from_yaml_str("interleaved_gate: null\n").unwrap();
        assert_eq!(config.interleaved_clifford().unwrap(), None);

        let config = ExperimentConfig::from_yaml_str("interleaved_gate: none\n").unwrap();
        assert_eq!(config.interleaved_clifford().unwrap(), None);
        assert!(!config.experiment().unwrap().is_interleaved());
    }

    #[test]
    fn test_validation_errors() {
        for yaml in [
            "num_qubits: 2\n",
            "num_circuits: 0\n",
            "depths: []\n",
            "interleaved_gate: T\n",
            "simulator:\n  depolarizing: 1.5\n",
            "simulator:\n  readout_error: -0.1\n",
            "simulator:\n  shots: 0\n",
        ] {
            let err = ExperimentConfig::from_yaml_str(yaml).unwrap_err();
            assert!(
                matches!(err, ConfigError::ValidationError(_)),
                "{yaml:?} gave {err}"
            );
        }
    }

    #[test]
    fn test_parse_error() {
        let err = ExperimentConfig::from_yaml_str("depths: [1, two]\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_env_overrides() {
        let config = ExperimentConfig::default()
            .merge_env_with(lookup(&[
                ("QCVV_NUM_CIRCUITS", "4"),
                ("QCVV_DEPTHS", "1, 2,8"),
                ("QCVV_INTERLEAVED_GATE", "h"),
                ("QCVV_SEED", "99"),
                ("QCVV_SHOTS", "1000"),
            ]))
            .unwrap();
        assert_eq!(config.num_circuits, 4);
        assert_eq!(config.depths, vec![1, 2, 8]);
        assert_eq!(config.interleaved_clifford().unwrap(), Some(Clifford::H));
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.simulator.shots, Some(1000));
    }

    #[test]
    fn test_env_absent_keeps_values() {
        let base = ExperimentConfig::from_yaml_str("num_circuits: 7\n").unwrap();
        let merged = base.clone().merge_env_with(lookup(&[])).unwrap();
        assert_eq!(merged, base);
    }

    #[test]
    fn test_env_invalid_value() {
        let err = ExperimentConfig::default()
            .merge_env_with(lookup(&[("QCVV_SEED", "abc")]))
            .unwrap_err();
        assert!(err.to_string().contains("QCVV_SEED"));

        assert!(
            ExperimentConfig::default()
                .merge_env_with(lookup(&[("QCVV_DEPTHS", "1,x")]))
                .is_err()
        );
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "num_circuits: 2\ninterleaved_gate: SX\nseed: 5").unwrap();
        let config = ExperimentConfig::from_file(file.path()).unwrap();
        assert_eq!(config.num_circuits, 2);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.interleaved_clifford().unwrap(), Some(Clifford::SX));
    }

    #[test]
    fn test_missing_file() {
        let err = ExperimentConfig::from_file("/nonexistent/qcvv.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = ExperimentConfig {
            seed: Some(3),
            ..Default::default()
        };
        let yaml = config.to_yaml().unwrap();
        assert_eq!(ExperimentConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_error_messages() {
        let err = ExperimentConfig::from_yaml_str("num_circuits: 0\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: num_circuits must be greater than 0"
        );
        let err = ExperimentConfig::from_file("/nonexistent/qcvv.yaml").unwrap_err();
        assert!(err.to_string().starts_with("IO error: "));
    }

    #[test]
    fn test_load_unvalidated_defers_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "num_circuits: 0\ninterleaved_gate: bogus").unwrap();
        let path = file.path().to_str().unwrap();

        let mut config = ExperimentConfig::load_unvalidated(Some(path)).unwrap();
        assert_eq!(config.num_circuits, 0);
        assert!(ExperimentConfig::load(Some(path)).is_err());

        // Later overrides can repair the values before validation.
        config.num_circuits = 3;
        config.interleaved_gate = Some("X".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_unvalidated_still_rejects_bad_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "depths: [1, two]").unwrap();
        let err = ExperimentConfig::load_unvalidated(file.path().to_str()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
