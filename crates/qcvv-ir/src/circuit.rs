//! Circuit builder API.

use serde::{Deserialize, Serialize};

use crate::clifford::Clifford;
use crate::error::{IrError, IrResult};
use crate::instruction::{GateRole, Instruction};
use crate::qubit::{ClbitId, QubitId};

/// A Clifford benchmarking circuit.
///
/// Holds a flat instruction list over a fixed register of qubits and
/// classical bits. Operands are validated when instructions are appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Number of classical bits.
    num_clbits: u32,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            num_clbits,
            instructions: vec![],
        }
    }

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Get the instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    fn check_qubit(&self, qubit: QubitId, gate: Option<&Clifford>) -> IrResult<()> {
        if qubit.0 >= self.num_qubits {
            return Err(IrError::QubitNotFound {
                qubit,
                gate_name: gate.map(ToString::to_string),
            });
        }
        Ok(())
    }

    /// Append a Clifford element.
    pub fn apply(&mut self, gate: Clifford, qubit: QubitId, role: GateRole) -> IrResult<&mut Self> {
        self.check_qubit(qubit, Some(&gate))?;
        self.instructions.push(Instruction::clifford(gate, qubit, role));
        Ok(self)
    }

    /// Append a measurement.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.check_qubit(qubit, None)?;
        if clbit.0 >= self.num_clbits {
            return Err(IrError::ClbitNotFound { clbit });
        }
        self.instructions.push(Instruction::measure(qubit, clbit));
        Ok(self)
    }

    /// Measure every qubit into the classical bit of the same index.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        for i in 0..self.num_qubits {
            self.measure(QubitId(i), ClbitId(i))?;
        }
        Ok(self)
    }

    /// Number of Clifford operations, excluding measurements.
    pub fn num_clifford_ops(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_clifford()).count()
    }

    /// Number of Clifford operations with the given role.
    pub fn count_role(&self, role: GateRole) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, Instruction::Clifford { role: r, .. } if *r == role))
            .count()
    }

    /// Check whether the circuit contains any measurement.
    pub fn has_measurements(&self) -> bool {
        self.instructions.iter().any(Instruction::is_measure)
    }

    /// Circuit depth: the longest per-qubit instruction chain.
    ///
    /// All instructions are single-qubit, so layers never span wires.
    pub fn depth(&self) -> usize {
        (0..self.num_qubits)
            .map(|q| {
                self.instructions
                    .iter()
                    .filter(|i| i.qubit() == QubitId(q))
                    .count()
            })
            .max()
            .unwrap_or(0)
    }

    /// Product of all Clifford operations on `qubit`, in program order.
    pub fn composed(&self, qubit: QubitId) -> IrResult<Clifford> {
        self.check_qubit(qubit, None)?;
        Ok(self
            .instructions
            .iter()
            .filter(|i| i.qubit() == qubit)
            .filter_map(Instruction::as_clifford)
            .fold(Clifford::I, |acc, gate| acc.then(gate)))
    }
}
