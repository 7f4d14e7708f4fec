//! Selection strategies for the GA.
//!
//! Selection maps a fitness vector to a parent index list of the same
//! length. The list is consumed in consecutive pairs `(2i, 2i + 1)`, one
//! pair per crossover.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::direction::{best_index, Direction};
use crate::error::{OptimError, Result};
use rand::seq::index;
use rand::RngCore;

/// Chooses parent pairs from a fitness vector.
///
/// Implementations are stateless, so a single instance can be shared by
/// any number of runs.
pub trait Selection: Send + Sync {
    /// Returns `fitness.len()` parent indices, paired as `(2i, 2i + 1)`.
    fn select(
        &self,
        fitness: &[f64],
        direction: Direction,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>>;

    /// Human-readable strategy name, used in logs and sweep reports.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Binary tournament selection over disjoint groups.
///
/// For every pair four distinct candidates are drawn and split into two
/// groups of two; the winner of each group (per [`Direction`]) fills one
/// slot.
///
/// The groups are disjoint, so the two parents of a pair are always
/// different individuals and no redraw is needed. Consecutive pairs may
/// share a parent. Four distinct candidates require a population of at
/// least 4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TournamentSelection;

impl Selection for TournamentSelection {
    fn select(
        &self,
        fitness: &[f64],
        direction: Direction,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>> {
        let n = fitness.len();
        ensure_pairable(n)?;
        if n < 4 {
            return Err(OptimError::InvalidConfig(format!(
                "tournament selection needs at least 4 individuals, got {n}"
            )));
        }

        let mut parents = Vec::with_capacity(n);
        for _ in 0..n / 2 {
            let drawn = index::sample(rng, n, 4);
            parents.push(group_winner(fitness, direction, drawn.index(0), drawn.index(1)));
            parents.push(group_winner(fitness, direction, drawn.index(2), drawn.index(3)));
        }
        Ok(parents)
    }

    fn name(&self) -> &'static str {
        "tournament"
    }
}

fn group_winner(fitness: &[f64], direction: Direction, a: usize, b: usize) -> usize {
    let group = [a, b];
    let local = best_index(&[fitness[a], fitness[b]], direction).unwrap_or(0);
    group[local]
}

/// Fitness-proportionate (roulette wheel) selection.
///
/// Each individual's weight is `fitness / sum(fitness)`. Two candidates
/// are drawn without replacement under those weights; the numerically
/// larger fitness takes the even slot and the other the odd slot.
///
/// **Note**: the weighting always favours *larger* fitness values, even
/// when the run minimizes. Fitness values must be finite and
/// non-negative, with at least two of them positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouletteSelection;

impl Selection for RouletteSelection {
    fn select(
        &self,
        fitness: &[f64],
        _direction: Direction,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<usize>> {
        let n = fitness.len();
        ensure_pairable(n)?;
        if n < 2 {
            return Err(OptimError::InvalidConfig(format!(
                "roulette selection needs at least 2 individuals, got {n}"
            )));
        }
        if let Some(bad) = fitness.iter().find(|f| !f.is_finite() || **f < 0.0) {
            return Err(OptimError::NumericalHazard(format!(
                "roulette weights must be finite and non-negative, got {bad}"
            )));
        }
        if fitness.iter().filter(|&&f| f > 0.0).count() < 2 {
            return Err(OptimError::NumericalHazard(
                "roulette selection needs at least two positive fitness values".into(),
            ));
        }

        let total: f64 = fitness.iter().sum();
        let mut parents = Vec::with_capacity(n);
        for _ in 0..n / 2 {
            let drawn = index::sample_weighted(rng, n, |i| fitness[i] / total, 2)
                .map_err(|e| OptimError::NumericalHazard(format!("roulette draw failed: {e}")))?;
            let (a, b) = (drawn.index(0), drawn.index(1));
            if fitness[b] > fitness[a] {
                parents.push(b);
                parents.push(a);
            } else {
                parents.push(a);
                parents.push(b);
            }
        }
        Ok(parents)
    }

    fn name(&self) -> &'static str {
        "roulette"
    }
}

/// Parent lists are consumed in pairs, so the population must be even.
fn ensure_pairable(n: usize) -> Result<()> {
    if n % 2 != 0 {
        return Err(OptimError::shape("fitness vector (even length)", n & !1, n));
    }
    Ok(())
}
