//! Circuit instructions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clifford::Clifford;
use crate::qubit::{ClbitId, QubitId};

/// Why a Clifford operation sits in a benchmarking circuit.
///
/// Samplers may use the role to attach different noise to the gate under
/// test than to the surrounding random sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateRole {
    /// Element of the random base sequence.
    Random,
    /// The gate being characterised, inserted after each random element.
    Interleaved,
    /// Closing element that returns the sequence to identity.
    Inverse,
}

impl fmt::Display for GateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateRole::Random => write!(f, "random"),
            GateRole::Interleaved => write!(f, "interleaved"),
            GateRole::Inverse => write!(f, "inverse"),
        }
    }
}

/// A single circuit operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    /// A single-qubit Clifford element.
    Clifford {
        /// The group element.
        gate: Clifford,
        /// Target qubit.
        qubit: QubitId,
        /// Position of the gate in the benchmarking sequence.
        role: GateRole,
    },
    /// Computational-basis measurement.
    Measure {
        /// Measured qubit.
        qubit: QubitId,
        /// Destination classical bit.
        clbit: ClbitId,
    },
}

impl Instruction {
    /// Create a Clifford instruction.
    pub fn clifford(gate: Clifford, qubit: QubitId, role: GateRole) -> Self {
        Instruction::Clifford { gate, qubit, role }
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Instruction::Measure { qubit, clbit }
    }

    /// The qubit this instruction acts on.
    pub fn qubit(&self) -> QubitId {
        match self {
            Instruction::Clifford { qubit, .. } | Instruction::Measure { qubit, .. } => *qubit,
        }
    }

    /// Check if this is a Clifford operation.
    pub fn is_clifford(&self) -> bool {
        matches!(self, Instruction::Clifford { .. })
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self, Instruction::Measure { .. })
    }

    /// The Clifford element, if this is a gate.
    pub fn as_clifford(&self) -> Option<&Clifford> {
        match self {
            Instruction::Clifford { gate, .. } => Some(gate),
            Instruction::Measure { .. } => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Clifford { gate, qubit, role } => write!(f, "{gate} {qubit} [{role}]"),
            Instruction::Measure { qubit, clbit } => write!(f, "measure {qubit} -> {clbit}"),
        }
    }
}
