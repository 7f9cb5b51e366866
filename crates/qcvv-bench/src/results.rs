//! Analysis results and gate-error estimates.
//!
//! A standard RB run reports the average error of the random Cliffords; an
//! interleaved run additionally reports the error of the gate under test.
//! [`AnalysisResult`] carries exactly the fields of whichever was run.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::BenchmarkResult;
use crate::aggregate::ResultTable;
use crate::error::BenchResult;
use crate::fit::{DecayFit, fit_decay};
use crate::sample::Variant;

/// `1 − 2^(−n)`, the depolarizing-to-average-error scale for `n` qubits.
pub fn dimension_factor(num_qubits: u32) -> f64 {
    1.0 - 2f64.powi(-(num_qubits as i32))
}

/// Average gate error and its standard deviation from the plain decay.
///
/// `e = (1 − 2^(−n))·(1 − r)`, `σ_e = (1 − 2^(−n))·σ_r`.
pub fn average_gate_error(rb: &DecayFit, num_qubits: u32) -> (f64, f64) {
    let scale = dimension_factor(num_qubits);
    (
        scale * (1.0 - rb.decay_coefficient),
        scale * rb.decay_coefficient_std,
    )
}

/// Error of the interleaved gate and its standard deviation.
///
/// `e = (1 − r_irb/r_rb)·(1 − 2^(−n))`. The two decay estimates are
/// independent, so the ratio's uncertainty adds in quadrature; for one
/// qubit this is `sqrt[(σ_irb/(2·r_rb))² + (r_irb·σ_rb/(2·r_rb²))²]`.
pub fn interleaved_gate_error(rb: &DecayFit, irb: &DecayFit, num_qubits: u32) -> (f64, f64) {
    let scale = dimension_factor(num_qubits);
    let (r_rb, s_rb) = (rb.decay_coefficient, rb.decay_coefficient_std);
    let (r_irb, s_irb) = (irb.decay_coefficient, irb.decay_coefficient_std);

    let error = (1.0 - r_irb / r_rb) * scale;
    let std = ((scale * s_irb / r_rb).powi(2) + (scale * r_irb * s_rb / r_rb.powi(2)).powi(2)).sqrt();
    (error, std)
}

/// Results of a standard randomized benchmarking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RbResults {
    /// Backend the circuits ran on.
    pub target: String,
    /// Number of circuits analysed.
    pub total_circuits: usize,
    /// Decay coefficient of the random sequences.
    pub rb_decay_coefficient: f64,
    /// Standard deviation of the decay coefficient.
    pub rb_decay_coefficient_std: f64,
    /// Average error per Clifford.
    pub average_gate_error: f64,
    /// Standard deviation of the average error.
    pub average_gate_error_std: f64,
}

/// Results of an interleaved randomized benchmarking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrbResults {
    /// Backend the circuits ran on.
    pub target: String,
    /// Number of circuits analysed.
    pub total_circuits: usize,
    /// Decay coefficient without the interleaved gate.
    pub rb_decay_coefficient: f64,
    /// Standard deviation of the plain decay coefficient.
    pub rb_decay_coefficient_std: f64,
    /// Decay coefficient with the interleaved gate.
    pub irb_decay_coefficient: f64,
    /// Standard deviation of the interleaved decay coefficient.
    pub irb_decay_coefficient_std: f64,
    /// Estimated average error of the interleaved gate.
    pub average_interleaved_gate_error: f64,
    /// Standard deviation of the interleaved gate error.
    pub average_interleaved_gate_error_std: f64,
}

/// Outcome of analysing a benchmarking experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "experiment")]
pub enum AnalysisResult {
    /// No interleaving gate was configured.
    #[serde(rename = "RB")]
    Plain(RbResults),
    /// Both variants were fitted.
    #[serde(rename = "IRB")]
    Interleaved(IrbResults),
}

impl AnalysisResult {
    /// The variant whose gate error is reported.
    pub fn variant(&self) -> Variant {
        match self {
            AnalysisResult::Plain(_) => Variant::Plain,
            AnalysisResult::Interleaved(_) => Variant::Interleaved,
        }
    }

    /// Backend the circuits ran on.
    pub fn target(&self) -> &str {
        match self {
            AnalysisResult::Plain(r) => &r.target,
            AnalysisResult::Interleaved(r) => &r.target,
        }
    }

    /// Number of circuits analysed.
    pub fn total_circuits(&self) -> usize {
        match self {
            AnalysisResult::Plain(r) => r.total_circuits,
            AnalysisResult::Interleaved(r) => r.total_circuits,
        }
    }

    /// The headline gate error and its standard deviation.
    pub fn gate_error(&self) -> (f64, f64) {
        match self {
            AnalysisResult::Plain(r) => (r.average_gate_error, r.average_gate_error_std),
            AnalysisResult::Interleaved(r) => (
                r.average_interleaved_gate_error,
                r.average_interleaved_gate_error_std,
            ),
        }
    }

    /// Record the backend name.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        let target = target.into();
        match &mut self {
            AnalysisResult::Plain(r) => r.target = target,
            AnalysisResult::Interleaved(r) => r.target = target,
        }
        self
    }

    /// Flatten into a [`BenchmarkResult`] record.
    pub fn to_benchmark_result(&self, duration: Duration) -> BenchmarkResult {
        let (error, error_std) = self.gate_error();
        let base = BenchmarkResult::new(
            format!("{}_1q", self.variant().label().to_ascii_lowercase()),
            1.0 - error,
            "gate_fidelity",
        )
        .with_duration(duration)
        .with_metric("target", self.target())
        .with_metric("total_circuits", self.total_circuits() as u64);

        match self {
            AnalysisResult::Plain(r) => base
                .with_metric("rb_decay_coefficient", r.rb_decay_coefficient)
                .with_metric("rb_decay_coefficient_std", r.rb_decay_coefficient_std)
                .with_metric("average_gate_error", error)
                .with_metric("average_gate_error_std", error_std),
            AnalysisResult::Interleaved(r) => base
                .with_metric("rb_decay_coefficient", r.rb_decay_coefficient)
                .with_metric("rb_decay_coefficient_std", r.rb_decay_coefficient_std)
                .with_metric("irb_decay_coefficient", r.irb_decay_coefficient)
                .with_metric("irb_decay_coefficient_std", r.irb_decay_coefficient_std)
                .with_metric("average_interleaved_gate_error", error)
                .with_metric("average_interleaved_gate_error_std", error_std),
        }
    }
}

/// Fit the result table and derive the gate-error estimate.
///
/// With `interleaved` unset only the plain rows are fitted and the average
/// gate error is reported; interleaved rows, if any, are ignored. With it
/// set both variants must fit.
pub fn fit_and_estimate(
    table: &ResultTable,
    num_qubits: u32,
    interleaved: bool,
) -> BenchResult<AnalysisResult> {
    let rb = fit_decay(table, Variant::Plain)?;

    if !interleaved {
        if table.contains(Variant::Interleaved) {
            tracing::warn!("Ignoring interleaved rows: no interleaving gate is configured");
        }
        let (error, error_std) = average_gate_error(&rb, num_qubits);
        return Ok(AnalysisResult::Plain(RbResults {
            target: String::new(),
            total_circuits: table.len(),
            rb_decay_coefficient: rb.decay_coefficient,
            rb_decay_coefficient_std: rb.decay_coefficient_std,
            average_gate_error: error,
            average_gate_error_std: error_std,
        }));
    }

    let irb = fit_decay(table, Variant::Interleaved)?;
    let (error, error_std) = interleaved_gate_error(&rb, &irb, num_qubits);
    Ok(AnalysisResult::Interleaved(IrbResults {
        target: String::new(),
        total_circuits: table.len(),
        rb_decay_coefficient: rb.decay_coefficient,
        rb_decay_coefficient_std: rb.decay_coefficient_std,
        irb_decay_coefficient: irb.decay_coefficient,
        irb_decay_coefficient_std: irb.decay_coefficient_std,
        average_interleaved_gate_error: error,
        average_interleaved_gate_error_std: error_std,
    }))
}
