//! Interleaved Randomized Benchmarking (IRB).
//!
//! Estimates the error of a single Clifford gate `C*`. A random sequence of
//! `m` Cliffords is drawn and turned into two circuits:
//!
//! - **RB**: the sequence followed by the single element inverting it.
//! - **IRB**: `C*` inserted after every element of the sequence, followed
//!   by the element inverting the whole interleaved product.
//!
//! Both circuits compose to the identity, so a noiseless backend always
//! returns `|0⟩`. The survival probability `f(m) = 2·P(0) − 1` decays as
//! `A·r^m`; fitting `log f` against `m` for each variant gives `r_rb` and
//! `r_irb`, and the gate error is `(1 − r_irb/r_rb)·(1 − 2^(−n))`.
//!
//! Without an interleaving gate the experiment reduces to standard RB and
//! reports the average error per Clifford instead.
//!
//! See Magesan et al., "Efficient measurement of quantum gate error by
//! interleaved randomized benchmarking", arXiv:1203.4550.

use rand::Rng;
use serde::{Deserialize, Serialize};

use qcvv_ir::{Circuit, Clifford, GateRole, QubitId};

use crate::aggregate::{ResultTable, aggregate};
use crate::error::{BenchError, BenchResult};
use crate::generator::random_sequence;
use crate::results::{AnalysisResult, fit_and_estimate};
use crate::sample::{Sample, Variant};
use crate::sampler::Sampler;

/// Gate interleaved when none is specified.
pub const DEFAULT_INTERLEAVED_GATE: Clifford = Clifford::Z;

/// An RB or IRB experiment definition.
///
/// Built through [`IrbExperiment::new`] only; serialized batches carry a
/// [`SampleBatch`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IrbExperiment {
    num_qubits: u32,
    interleaved_gate: Option<Clifford>,
}

/// Everything produced by [`IrbExperiment::run`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentRun {
    /// Sampled circuits.
    pub samples: Vec<Sample>,
    /// One row per sample.
    pub table: ResultTable,
    /// Fitted estimate.
    pub result: AnalysisResult,
}

/// An experiment definition together with its samples.
///
/// This is the interchange format for sampling outside the process: write
/// it after building, fill in each sample's probabilities, read it back
/// for analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleBatch {
    /// Number of qubits benchmarked.
    pub num_qubits: u32,
    /// Gate under test, if any.
    pub interleaved_gate: Option<Clifford>,
    /// The samples, possibly with probabilities attached.
    pub samples: Vec<Sample>,
}

impl IrbExperiment {
    /// Create an experiment.
    ///
    /// Only single-qubit benchmarking is supported.
    pub fn new(num_qubits: u32, interleaved_gate: Option<Clifford>) -> BenchResult<Self> {
        if num_qubits != 1 {
            return Err(BenchError::UnsupportedConfiguration(format!(
                "IRB is only implemented for a single qubit, got num_qubits = {num_qubits}"
            )));
        }
        Ok(Self {
            num_qubits,
            interleaved_gate,
        })
    }

    /// Single-qubit experiment interleaving `gate`.
    pub fn interleaved(gate: Clifford) -> Self {
        Self {
            num_qubits: 1,
            interleaved_gate: Some(gate),
        }
    }

    /// Single-qubit standard RB experiment.
    pub fn standard() -> Self {
        Self {
            num_qubits: 1,
            interleaved_gate: None,
        }
    }

    /// Number of qubits benchmarked.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// The gate under test, if any.
    pub fn interleaved_gate(&self) -> Option<Clifford> {
        self.interleaved_gate
    }

    /// Whether interleaved circuits are built.
    pub fn is_interleaved(&self) -> bool {
        self.interleaved_gate.is_some()
    }

    fn qubit(&self) -> QubitId {
        QubitId(0)
    }

    /// Append the inverse of everything in `circuit`, then measure.
    fn close_and_measure(&self, circuit: &mut Circuit) -> BenchResult<()> {
        let inverse = circuit.composed(self.qubit())?.inverse();
        circuit.apply(inverse, self.qubit(), GateRole::Inverse)?;
        circuit.measure_all()?;
        Ok(())
    }

    fn rb_circuit(&self, sequence: &[Clifford], name: String) -> BenchResult<Circuit> {
        let mut circuit = Circuit::with_size(name, self.num_qubits, self.num_qubits);
        for gate in sequence {
            circuit.apply(*gate, self.qubit(), GateRole::Random)?;
        }
        self.close_and_measure(&mut circuit)?;
        Ok(circuit)
    }

    fn irb_circuit(
        &self,
        sequence: &[Clifford],
        interleaved: Clifford,
        name: String,
    ) -> BenchResult<Circuit> {
        let mut circuit = Circuit::with_size(name, self.num_qubits, self.num_qubits);
        for gate in sequence {
            circuit
                .apply(*gate, self.qubit(), GateRole::Random)?
                .apply(interleaved, self.qubit(), GateRole::Interleaved)?;
        }
        self.close_and_measure(&mut circuit)?;
        Ok(circuit)
    }

    /// Build the randomized circuits.
    ///
    /// For each of `num_circuits` trials and each depth, one random base
    /// sequence yields an RB sample and, when a gate is configured, an IRB
    /// sample sharing the same sequence.
    pub fn build_circuits<R: Rng + ?Sized>(
        &self,
        num_circuits: usize,
        depths: &[usize],
        rng: &mut R,
    ) -> BenchResult<Vec<Sample>> {
        if num_circuits == 0 {
            return Err(BenchError::UnsupportedConfiguration(
                "num_circuits must be at least 1".to_string(),
            ));
        }
        if depths.is_empty() {
            return Err(BenchError::UnsupportedConfiguration(
                "at least one depth is required".to_string(),
            ));
        }
        tracing::debug!(num_circuits, ?depths, interleaved = ?self.interleaved_gate, "Building circuits");

        let per_trial = if self.is_interleaved() { 2 } else { 1 };
        let mut samples = Vec::with_capacity(num_circuits * depths.len() * per_trial);
        for trial in 0..num_circuits {
            for &depth in depths {
                let sequence = random_sequence(depth, rng);

                let rb = self.rb_circuit(&sequence, format!("rb_{depth}_{trial}"))?;
                samples.push(Sample::new(rb, depth, Variant::Plain));

                if let Some(gate) = self.interleaved_gate {
                    let irb = self.irb_circuit(&sequence, gate, format!("irb_{depth}_{trial}"))?;
                    samples.push(Sample::new(irb, depth, Variant::Interleaved));
                }
            }
        }
        tracing::debug!(samples = samples.len(), "Built circuits");
        Ok(samples)
    }

    /// Run every sample through `sampler`, attaching the returned probabilities.
    pub fn sample_all<S: Sampler + ?Sized>(
        &self,
        samples: &mut [Sample],
        sampler: &mut S,
    ) -> BenchResult<()> {
        for sample in samples.iter_mut() {
            let probabilities = sampler.sample(&sample.circuit)?;
            sample.probabilities = Some(probabilities);
        }
        Ok(())
    }

    /// Aggregate sampled probabilities into a result table.
    pub fn process(&self, samples: &[Sample]) -> BenchResult<ResultTable> {
        aggregate(samples, self.num_qubits)
    }

    /// Fit the table and estimate the gate error.
    pub fn analyze(&self, table: &ResultTable) -> BenchResult<AnalysisResult> {
        fit_and_estimate(table, self.num_qubits, self.is_interleaved())
    }

    /// Build, sample, aggregate and analyse in one pass.
    pub fn run<R, S>(
        &self,
        num_circuits: usize,
        depths: &[usize],
        rng: &mut R,
        sampler: &mut S,
    ) -> BenchResult<ExperimentRun>
    where
        R: Rng + ?Sized,
        S: Sampler + ?Sized,
    {
        let mut samples = self.build_circuits(num_circuits, depths, rng)?;
        self.sample_all(&mut samples, sampler)?;
        let table = self.process(&samples)?;
        let result = self.analyze(&table)?.with_target(sampler.name());
        Ok(ExperimentRun {
            samples,
            table,
            result,
        })
    }

    /// Package samples with this experiment's definition.
    pub fn to_batch(&self, samples: Vec<Sample>) -> SampleBatch {
        SampleBatch {
            num_qubits: self.num_qubits,
            interleaved_gate: self.interleaved_gate,
            samples,
        }
    }
}

impl SampleBatch {
    /// Rebuild the experiment definition, validating it.
    pub fn experiment(&self) -> BenchResult<IrbExperiment> {
        IrbExperiment::new(self.num_qubits, self.interleaved_gate)
    }
}
