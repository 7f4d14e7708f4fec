//! Mutation operators.
//!
//! A mutation takes an offspring population and a rate and returns a new
//! population of the same shape. The input is never modified.
//!
//! | Operator | Genes | Rate applies |
//! |----------|-------|--------------|
//! | [`BinaryFlipMutation`] | `u8` in {0, 1} | per gene |
//! | [`SwapMutation`] | any (permutation-safe) | per individual |
//! | [`IntervalMutation`] | `f64` | per gene |
//! | [`AmplificationMutation`] | `f64` | per gene |

use super::types::Population;
use crate::error::{OptimError, Result};
use crate::random::chance;
use rand::seq::index;
use rand::{Rng, RngCore};

/// Perturbs a population.
pub trait Mutation<G>: Send + Sync {
    /// Returns a mutated copy of `population`.
    fn mutate(
        &self,
        population: &Population<G>,
        rate: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Population<G>>;

    /// Human-readable strategy name, used in logs and sweep reports.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Flips each bit independently with probability `rate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinaryFlipMutation;

impl Mutation<u8> for BinaryFlipMutation {
    fn mutate(
        &self,
        population: &Population<u8>,
        rate: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Population<u8>> {
        if let Some(bad) = population.iter().flatten().find(|&&g| g > 1) {
            return Err(OptimError::InvalidGene(format!(
                "binary flip expects genes in {{0, 1}}, got {bad}"
            )));
        }
        Ok(population
            .iter()
            .map(|ind| {
                ind.iter()
                    .map(|&g| if chance(rng, rate) { 1 - g } else { g })
                    .collect()
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "binary-flip"
    }
}

/// Swaps two distinct random positions of an individual with probability
/// `rate` (once per individual, not per gene).
///
/// Preserves permutations. Individuals shorter than two genes are left
/// unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapMutation;

impl<G: Clone> Mutation<G> for SwapMutation {
    fn mutate(
        &self,
        population: &Population<G>,
        rate: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Population<G>> {
        let mut mutated = population.clone();
        for ind in mutated.iter_mut() {
            if ind.len() >= 2 && chance(rng, rate) {
                let picked = index::sample(rng, ind.len(), 2);
                ind.swap(picked.index(0), picked.index(1));
            }
        }
        Ok(mutated)
    }

    fn name(&self) -> &'static str {
        "swap"
    }
}

/// Replaces each gene, with probability `rate`, by a uniform draw from
/// `[lmin, lmax]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalMutation {
    lmin: f64,
    lmax: f64,
}

impl Default for IntervalMutation {
    fn default() -> Self {
        Self {
            lmin: -2.0,
            lmax: 2.0,
        }
    }
}

impl IntervalMutation {
    /// Creates an interval mutation. Bounds given in reverse are swapped.
    ///
    /// Returns an error if either bound is not finite.
    pub fn new(lmin: f64, lmax: f64) -> Result<Self> {
        if !lmin.is_finite() || !lmax.is_finite() {
            return Err(OptimError::InvalidConfig(format!(
                "interval mutation bounds must be finite, got [{lmin}, {lmax}]"
            )));
        }
        Ok(Self {
            lmin: lmin.min(lmax),
            lmax: lmin.max(lmax),
        })
    }

    /// The `(lmin, lmax)` sampling bounds.
    pub fn bounds(&self) -> (f64, f64) {
        (self.lmin, self.lmax)
    }
}

impl Mutation<f64> for IntervalMutation {
    fn mutate(
        &self,
        population: &Population<f64>,
        rate: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Population<f64>> {
        Ok(population
            .iter()
            .map(|ind| {
                ind.iter()
                    .map(|&g| {
                        if chance(rng, rate) {
                            rng.random_range(self.lmin..=self.lmax)
                        } else {
                            g
                        }
                    })
                    .collect()
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "interval"
    }
}

/// Scales each gene, with probability `rate`, by `1 + alpha`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmplificationMutation {
    alpha: f64,
}

impl Default for AmplificationMutation {
    fn default() -> Self {
        Self { alpha: 0.05 }
    }
}

impl AmplificationMutation {
    /// Creates an amplification mutation with distortion factor `alpha`.
    pub fn new(alpha: f64) -> Result<Self> {
        if !alpha.is_finite() {
            return Err(OptimError::InvalidConfig(format!(
                "amplification alpha must be finite, got {alpha}"
            )));
        }
        Ok(Self { alpha })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Mutation<f64> for AmplificationMutation {
    fn mutate(
        &self,
        population: &Population<f64>,
        rate: f64,
        rng: &mut dyn RngCore,
    ) -> Result<Population<f64>> {
        let factor = 1.0 + self.alpha;
        Ok(population
            .iter()
            .map(|ind| {
                ind.iter()
                    .map(|&g| if chance(rng, rate) { g * factor } else { g })
                    .collect()
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "amplification"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn is_valid_permutation(perm: &[usize], n: usize) -> bool {
        let set: HashSet<usize> = perm.iter().copied().collect();
        perm.len() == n && set.len() == n && perm.iter().all(|&v| v < n)
    }

    // ---- Binary flip ----

    #[test]
    fn test_binary_flip_rate_extremes() {
        let population: Population<u8> = vec![vec![0, 1, 1, 0, 1]; 4];
        let mut rng = create_rng(42);

        let untouched = BinaryFlipMutation.mutate(&population, 0.0, &mut rng).unwrap();
        assert_eq!(untouched, population);

        let flipped = BinaryFlipMutation.mutate(&population, 1.0, &mut rng).unwrap();
        for ind in &flipped {
            assert_eq!(ind, &vec![1, 0, 0, 1, 0]);
        }
    }

    #[test]
    fn test_binary_flip_rejects_non_bits() {
        let population: Population<u8> = vec![vec![0, 2, 1]];
        let mut rng = create_rng(0);
        let err = BinaryFlipMutation
            .mutate(&population, 0.5, &mut rng)
            .unwrap_err();
        assert!(matches!(err, OptimError::InvalidGene(_)));
    }

    proptest! {
        #[test]
        fn prop_binary_flip_gene_kept_or_complemented(
            bits in prop::collection::vec(0u8..=1, 1..64),
            rate in 0.0f64..=1.0,
            seed in any::<u64>(),
        ) {
            let population = vec![bits.clone()];
            let mut rng = create_rng(seed);
            let mutated = BinaryFlipMutation.mutate(&population, rate, &mut rng).unwrap();
            prop_assert_eq!(mutated[0].len(), bits.len());
            for (&after, &before) in mutated[0].iter().zip(&bits) {
                prop_assert!(after == before || after == 1 - before);
            }
        }
    }

    // ---- Swap ----

    #[test]
    fn test_swap_preserves_permutation() {
        let mut rng = create_rng(42);
        let population: Population<usize> = (0..50).map(|_| (0..10).collect()).collect();
        let mutated = SwapMutation.mutate(&population, 1.0, &mut rng).unwrap();
        for ind in &mutated {
            assert!(is_valid_permutation(ind, 10));
        }
        // Every individual swapped two distinct positions.
        for ind in &mutated {
            let moved = ind.iter().enumerate().filter(|&(i, &v)| i != v).count();
            assert_eq!(moved, 2);
        }
    }

    #[test]
    fn test_swap_zero_rate_is_identity() {
        let mut rng = create_rng(1);
        let population: Population<usize> = vec![vec![3, 1, 2, 0]; 6];
        let mutated = SwapMutation.mutate(&population, 0.0, &mut rng).unwrap();
        assert_eq!(mutated, population);
    }

    #[test]
    fn test_swap_single_gene_untouched() {
        let mut rng = create_rng(42);
        let population: Population<usize> = vec![vec![0]];
        let mutated = SwapMutation.mutate(&population, 1.0, &mut rng).unwrap();
        assert_eq!(mutated, population);
    }

    #[test]
    fn test_mutation_does_not_touch_input() {
        let mut rng = create_rng(5);
        let population: Population<f64> = vec![vec![1.0, 2.0, 3.0]; 3];
        let snapshot = population.clone();
        let _ = IntervalMutation::default()
            .mutate(&population, 1.0, &mut rng)
            .unwrap();
        assert_eq!(population, snapshot);
    }

    // ---- Interval ----

    #[test]
    fn test_interval_replaces_within_bounds() {
        let mut rng = create_rng(42);
        let mutation = IntervalMutation::new(-0.5, 0.5).unwrap();
        let population: Population<f64> = vec![vec![100.0; 8]; 10];
        let mutated = mutation.mutate(&population, 1.0, &mut rng).unwrap();
        for g in mutated.iter().flatten() {
            assert!((-0.5..=0.5).contains(g), "gene {g} out of bounds");
        }
    }

    #[test]
    fn test_interval_swaps_reversed_bounds() {
        let mutation = IntervalMutation::new(3.0, -1.0).unwrap();
        assert_eq!(mutation.bounds(), (-1.0, 3.0));
        assert!(IntervalMutation::new(f64::NAN, 1.0).is_err());
    }

    // ---- Amplification ----

    #[test]
    fn test_amplification_scales_genes() {
        let mut rng = create_rng(42);
        let mutation = AmplificationMutation::new(0.5).unwrap();
        let population: Population<f64> = vec![vec![2.0, -4.0]];
        let all = mutation.mutate(&population, 1.0, &mut rng).unwrap();
        assert_eq!(all, vec![vec![3.0, -6.0]]);
        let none = mutation.mutate(&population, 0.0, &mut rng).unwrap();
        assert_eq!(none, population);
    }

    #[test]
    fn test_amplification_default_alpha() {
        assert!((AmplificationMutation::default().alpha() - 0.05).abs() < 1e-12);
        assert!(AmplificationMutation::new(f64::INFINITY).is_err());
    }
}
