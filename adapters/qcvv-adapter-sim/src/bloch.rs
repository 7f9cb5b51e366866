//! Bloch-vector simulation engine.

use qcvv_ir::Clifford;

/// A single-qubit mixed state as a real Bloch vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlochVector {
    r: [f64; 3],
}

impl BlochVector {
    /// Create the |0⟩ state.
    pub fn new() -> Self {
        Self { r: [0.0, 0.0, 1.0] }
    }

    /// Apply a Clifford gate.
    pub fn apply(&mut self, gate: &Clifford) {
        self.r = gate.apply_bloch(self.r);
    }

    /// Apply a depolarizing channel with error probability `p`.
    pub fn depolarize(&mut self, p: f64) {
        for component in &mut self.r {
            *component *= 1.0 - p;
        }
    }

    /// Probability of measuring 0 in the computational basis.
    pub fn prob_zero(&self) -> f64 {
        ((1.0 + self.r[2]) / 2.0).clamp(0.0, 1.0)
    }

    /// Length of the Bloch vector.
    #[cfg(test)]
    pub fn purity_radius(&self) -> f64 {
        self.r.iter().map(|c| c * c).sum::<f64>().sqrt()
    }
}

impl Default for BlochVector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = BlochVector::new();
        assert_eq!(state.prob_zero(), 1.0);
    }

    #[test]
    fn test_x_flips() {
        let mut state = BlochVector::new();
        state.apply(&Clifford::X);
        assert!(state.prob_zero().abs() < 1e-12);
    }

    #[test]
    fn test_hadamard_gives_equal_superposition() {
        let mut state = BlochVector::new();
        state.apply(&Clifford::H);
        assert!((state.prob_zero() - 0.5).abs() < 1e-12);
        assert!((state.purity_radius() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_depolarizing_shrinks() {
        let mut state = BlochVector::new();
        state.depolarize(0.1);
        state.depolarize(0.1);
        assert!((state.purity_radius() - 0.81).abs() < 1e-12);
        assert!((state.prob_zero() - 0.905).abs() < 1e-12);
    }

    #[test]
    fn test_fully_depolarized() {
        let mut state = BlochVector::new();
        state.depolarize(1.0);
        assert_eq!(state.prob_zero(), 0.5);
    }
}
