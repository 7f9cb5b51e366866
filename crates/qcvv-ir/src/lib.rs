//! qcvv circuit representation
//!
//! Core data structures shared by the benchmarking pipeline and samplers:
//! the single-qubit Clifford group, a flat circuit of Clifford operations
//! and measurements, and the noise channels used by local simulation.
//!
//! # Example: an inverted Clifford sequence
//!
//! ```rust
//! use qcvv_ir::{Circuit, Clifford, GateRole, QubitId};
//!
//! let mut circuit = Circuit::with_size("rb_example", 1, 1);
//! let sequence = [Clifford::H, Clifford::S, Clifford::X];
//! for gate in sequence {
//!     circuit.apply(gate, QubitId(0), GateRole::Random).unwrap();
//! }
//!
//! // Close the sequence so that it composes to the identity.
//! let inverse = circuit.composed(QubitId(0)).unwrap().inverse();
//! circuit.apply(inverse, QubitId(0), GateRole::Inverse).unwrap();
//! circuit.measure_all().unwrap();
//!
//! assert!(circuit.composed(QubitId(0)).unwrap().is_identity());
//! assert_eq!(circuit.num_clifford_ops(), 4);
//! ```

pub mod circuit;
pub mod clifford;
pub mod error;
pub mod instruction;
pub mod noise;
pub mod qubit;

pub use circuit::Circuit;
pub use clifford::{Axis, Clifford, SignedPauli};
pub use error::{IrError, IrResult};
pub use instruction::{GateRole, Instruction};
pub use noise::NoiseModel;
pub use qubit::{ClbitId, QubitId};
