//! Error types for the IR crate.

use crate::clifford::SignedPauli;
use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not found in circuit.
    #[error("Qubit {qubit} not found in circuit{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Classical bit not found in circuit.
    #[error("Classical bit {clbit} not found in circuit")]
    ClbitNotFound {
        /// The classical bit that was not found.
        clbit: ClbitId,
    },

    /// The images of X and Z do not define a Clifford element.
    #[error("X -> {x} and Z -> {z} do not define a Clifford element")]
    InvalidClifford {
        /// Image of X.
        x: SignedPauli,
        /// Image of Z.
        z: SignedPauli,
    },

    /// Gate name not recognised.
    #[error("Unknown Clifford gate '{0}'")]
    UnknownGate(String),

    /// Noise parameter outside [0, 1].
    #[error("Noise parameter for {model} must lie in [0, 1], got {value}")]
    InvalidNoiseParameter {
        /// Name of the noise model.
        model: String,
        /// The rejected value.
        value: f64,
    },
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
