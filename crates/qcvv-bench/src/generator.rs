//! Random Clifford sequence generation.
//!
//! A uniformly random single-qubit Clifford is drawn as the product of a
//! uniformly random coset representative `{I, S, H, HS, SH, HSH}` and a
//! uniformly random Pauli `{I, X, Y, Z}`. Each of the 24 combinations is a
//! distinct group element, so the draw covers the group uniformly.

use rand::Rng;

use qcvv_ir::Clifford;

use crate::error::{BenchError, BenchResult};

/// The Pauli subgroup, one factor of every random draw.
pub const PAULIS: [Clifford; 4] = [Clifford::I, Clifford::X, Clifford::Y, Clifford::Z];

/// Coset representatives of the Pauli subgroup, in circuit order.
pub fn coset_representatives() -> [Clifford; 6] {
    let (h, s) = (Clifford::H, Clifford::S);
    [
        Clifford::I,
        s,
        h,
        h.then(&s),
        s.then(&h),
        h.then(&s).then(&h),
    ]
}

/// Draw a uniformly random single-qubit Clifford element.
pub fn random_clifford<R: Rng + ?Sized>(rng: &mut R) -> Clifford {
    let representatives = coset_representatives();
    let coset = representatives[rng.gen_range(0..representatives.len())];
    let pauli = PAULIS[rng.gen_range(0..PAULIS.len())];
    coset.then(&pauli)
}

/// Draw `depth` independent random Clifford elements.
pub fn random_sequence<R: Rng + ?Sized>(depth: usize, rng: &mut R) -> Vec<Clifford> {
    (0..depth).map(|_| random_clifford(rng)).collect()
}

/// Compose a sequence left to right: the first element is applied first.
pub fn reduce(sequence: &[Clifford]) -> BenchResult<Clifford> {
    let (first, rest) = sequence.split_first().ok_or(BenchError::EmptySequence)?;
    Ok(rest.iter().fold(*first, |acc, next| acc.then(next)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_coset_products_cover_group() {
        let products: HashSet<Clifford> = coset_representatives()
            .iter()
            .flat_map(|c| PAULIS.iter().map(move |p| c.then(p)))
            .collect();
        assert_eq!(products.len(), 24);
    }

    #[test]
    fn test_reduce() {
        assert!(matches!(reduce(&[]), Err(BenchError::EmptySequence)));
        assert_eq!(reduce(&[Clifford::S]).unwrap(), Clifford::S);
        assert_eq!(reduce(&[Clifford::S, Clifford::S]).unwrap(), Clifford::Z);
        assert_eq!(
            reduce(&[Clifford::H, Clifford::Z, Clifford::H]).unwrap(),
            Clifford::X
        );
    }

    #[test]
    fn test_sequence_times_inverse_is_identity() {
        let mut rng = StdRng::seed_from_u64(7);
        for depth in 1..20 {
            let mut sequence = random_sequence(depth, &mut rng);
            let inverse = reduce(&sequence).unwrap().inverse();
            sequence.push(inverse);
            assert!(reduce(&sequence).unwrap().is_identity());
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = random_sequence(50, &mut StdRng::seed_from_u64(42));
        let b = random_sequence(50, &mut StdRng::seed_from_u64(42));
        let c = random_sequence(50, &mut StdRng::seed_from_u64(43));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_draws_are_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 48_000;
        let mut counts: HashMap<Clifford, usize> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(random_clifford(&mut rng)).or_default() += 1;
        }
        assert_eq!(counts.len(), 24);
        let expected = trials as f64 / 24.0;
        for (clifford, count) in counts {
            let ratio = count as f64 / expected;
            assert!(
                (0.9..1.1).contains(&ratio),
                "{clifford}: count {count} deviates from expected {expected:.0}"
            );
        }
    }
}
