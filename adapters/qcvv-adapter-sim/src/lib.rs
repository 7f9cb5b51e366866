//! qcvv Local Noisy Simulator
//!
//! This crate provides a [`Sampler`](qcvv_bench::Sampler) that executes
//! single-qubit Clifford circuits locally. The state is tracked as a Bloch
//! vector, which is exact for Clifford operations under depolarizing noise.
//!
//! # Noise model
//!
//! - **Depolarizing**: every Clifford operation shrinks the Bloch vector by `1 − p`
//! - **Interleaved depolarizing**: the gate under test shrinks it by a further `1 − p_i`
//! - **Readout error**: a measured bit is flipped with probability `e`
//!
//! Under this model an RB sequence of depth `m` survives with
//! `(1 − 2e)·(1 − p)^(m+1)`, so the recovered decay is `1 − p`.
//!
//! # Example
//!
//! ```rust
//! use qcvv_adapter_sim::SimulatorSampler;
//! use qcvv_bench::IrbExperiment;
//! use qcvv_ir::Clifford;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let experiment = IrbExperiment::interleaved(Clifford::X);
//! let mut sampler = SimulatorSampler::new()
//!     .with_depolarizing(0.01)
//!     .with_interleaved_noise(0.02);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let run = experiment.run(4, &[1, 5, 10], &mut rng, &mut sampler).unwrap();
//!
//! let (error, _) = run.result.gate_error();
//! let expected = (1.0 - 0.99 * 0.98) / 2.0;
//! assert!((error - expected).abs() < 1e-9);
//! ```

mod bloch;
mod simulator;

pub use simulator::{SIMULATOR_NAME, SimulatorSampler};
