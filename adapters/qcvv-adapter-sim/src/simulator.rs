//! Simulator sampler implementation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use tracing::{debug, trace};

use qcvv_bench::{BenchError, BenchResult, ProbabilityRecord, Sampler, SimulatorConfig};
use qcvv_ir::{Circuit, GateRole, Instruction, NoiseModel};

use crate::bloch::BlochVector;

/// Name reported as the target of analyses run on this sampler.
pub const SIMULATOR_NAME: &str = "local_simulator";

/// Local noisy simulator for single-qubit Clifford circuits.
///
/// Returns exact outcome probabilities unless a shot count is set, in
/// which case outcomes are drawn from a seedable random source.
#[derive(Debug, Clone)]
pub struct SimulatorSampler {
    depolarizing: f64,
    interleaved_depolarizing: f64,
    readout_error: f64,
    shots: Option<u64>,
    rng: StdRng,
}

impl SimulatorSampler {
    /// Create a noiseless simulator returning exact probabilities.
    pub fn new() -> Self {
        Self {
            depolarizing: 0.0,
            interleaved_depolarizing: 0.0,
            readout_error: 0.0,
            shots: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a simulator from configuration, validating the error rates.
    pub fn from_config(config: &SimulatorConfig, seed: Option<u64>) -> BenchResult<Self> {
        for model in config.noise_models() {
            model.validate()?;
        }
        let mut sampler = Self::new()
            .with_depolarizing(config.depolarizing)
            .with_interleaved_noise(config.interleaved_depolarizing)
            .with_readout_error(config.readout_error);
        if let Some(shots) = config.shots {
            sampler = sampler.with_shots(shots);
        }
        if let Some(seed) = seed {
            sampler = sampler.seeded(seed);
        }
        Ok(sampler)
    }

    /// Set the depolarizing probability applied after every Clifford operation.
    pub fn with_depolarizing(mut self, p: f64) -> Self {
        self.depolarizing = p;
        self
    }

    /// Set the extra depolarizing probability applied after interleaved gates.
    pub fn with_interleaved_noise(mut self, p: f64) -> Self {
        self.interleaved_depolarizing = p;
        self
    }

    /// Set the readout bit-flip probability.
    pub fn with_readout_error(mut self, p: f64) -> Self {
        self.readout_error = p;
        self
    }

    /// Sample `shots` outcomes per circuit instead of returning exact probabilities.
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = Some(shots);
        self
    }

    /// Reseed the shot sampler.
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Configured shots per circuit, if any.
    pub fn shots(&self) -> Option<u64> {
        self.shots
    }

    fn fail(&self, message: impl Into<String>) -> BenchError {
        BenchError::Sampler {
            sampler: SIMULATOR_NAME.to_string(),
            message: message.into(),
        }
    }

    fn validate_noise(&self) -> BenchResult<()> {
        NoiseModel::Depolarizing {
            p: self.depolarizing,
        }
        .validate()?;
        NoiseModel::Depolarizing {
            p: self.interleaved_depolarizing,
        }
        .validate()?;
        NoiseModel::ReadoutError {
            p: self.readout_error,
        }
        .validate()?;
        Ok(())
    }

    /// Exact probability of reading 0, including readout error.
    fn measured_prob_zero(&self, circuit: &Circuit) -> BenchResult<f64> {
        if circuit.num_qubits() != 1 {
            return Err(self.fail(format!(
                "only single-qubit circuits are supported, '{}' has {} qubits",
                circuit.name(),
                circuit.num_qubits()
            )));
        }

        let mut state = BlochVector::new();
        let mut measured = None;
        for instruction in circuit.instructions() {
            match instruction {
                Instruction::Clifford { gate, role, .. } => {
                    state.apply(gate);
                    state.depolarize(self.depolarizing);
                    if *role == GateRole::Interleaved {
                        state.depolarize(self.interleaved_depolarizing);
                    }
                }
                Instruction::Measure { .. } => measured = Some(state.prob_zero()),
            }
        }

        let p0 = measured
            .ok_or_else(|| self.fail(format!("circuit '{}' has no measurement", circuit.name())))?;
        let e = self.readout_error;
        Ok((p0 * (1.0 - e) + (1.0 - p0) * e).clamp(0.0, 1.0))
    }
}

impl Default for SimulatorSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for SimulatorSampler {
    fn name(&self) -> &str {
        SIMULATOR_NAME
    }

    fn sample(&mut self, circuit: &Circuit) -> BenchResult<ProbabilityRecord> {
        self.validate_noise()?;
        let p0 = self.measured_prob_zero(circuit)?;
        trace!(circuit = circuit.name(), p0, "Simulated circuit");

        let Some(shots) = self.shots else {
            return Ok([("0".to_string(), p0), ("1".to_string(), 1.0 - p0)]
                .into_iter()
                .collect());
        };

        if shots == 0 {
            return Err(self.fail("shots must be greater than 0"));
        }

        let zeros = (0..shots).filter(|_| self.rng.gen_bool(p0)).count() as u64;
        let counts = BTreeMap::from([("0".to_string(), zeros), ("1".to_string(), shots - zeros)]);
        debug!(circuit = circuit.name(), shots, zeros, "Sampled shots");
        ProbabilityRecord::from_counts(&counts)
    }
}
