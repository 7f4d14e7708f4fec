//! Crossover operators.
//!
//! A crossover consumes the current population and the parent index list
//! produced by [`Selection`](super::Selection) and returns a brand-new
//! offspring population of the same size: pair `(2i, 2i + 1)` of the
//! parent list yields offspring `2i` and `2i + 1`.
//!
//! - [`OnePointCrossover`]: any gene type
//! - [`OrderCrossover`] (OX): permutations of `0..n`, always yields valid
//!   permutations
//! - [`BlendCrossover`] (BLX-αβ): real-valued genes
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Eshelman & Schaffer (1993), "Real-Coded Genetic Algorithms and
//!   Interval-Schemata"

use super::types::{Individual, Population};
use crate::error::{OptimError, Result};
use rand::{Rng, RngCore};

/// Recombines parent pairs into an offspring population.
pub trait Crossover<G>: Send + Sync {
    /// Builds `population.len()` offspring from consecutive parent pairs.
    fn crossover(
        &self,
        population: &Population<G>,
        parents: &[usize],
        rng: &mut dyn RngCore,
    ) -> Result<Population<G>>;

    /// Human-readable strategy name, used in logs and sweep reports.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Smallest individual a cut-point operator can split.
const CUT_MIN_GENES: usize = 3;

/// Checks population/parent shapes up front and returns the gene count.
///
/// Every individual must share one length of at least `min_genes`. Cut-based
/// operators need 3 so that the cut range `[1, n - 2]` is non-empty.
fn check_shapes<G>(
    population: &Population<G>,
    parents: &[usize],
    min_genes: usize,
) -> Result<usize> {
    let size = population.len();
    if parents.len() != size {
        return Err(OptimError::shape("parent indices", size, parents.len()));
    }
    if parents.len() % 2 != 0 {
        return Err(OptimError::shape(
            "parent indices (even length)",
            parents.len() & !1,
            parents.len(),
        ));
    }
    if let Some(&bad) = parents.iter().find(|&&p| p >= size) {
        return Err(OptimError::InvalidConfig(format!(
            "parent index {bad} out of range for population of {size}"
        )));
    }
    let genes = population.first().map_or(0, Vec::len);
    if let Some(ind) = population.iter().find(|ind| ind.len() != genes) {
        return Err(OptimError::shape("individual length", genes, ind.len()));
    }
    if size > 0 && genes < min_genes {
        return Err(OptimError::InvalidConfig(format!(
            "crossover needs individuals with at least {min_genes} genes, got {genes}"
        )));
    }
    Ok(genes)
}

// ============================================================================
// One-point
// ============================================================================

/// Single cut-point crossover.
///
/// For a cut `c` drawn uniformly from `[1, n - 2]`:
///
/// - offspring 1 = `parent2[..c] ++ parent1[c..]`
/// - offspring 2 = `parent1[..c] ++ parent2[c..]`
///
/// Works on any gene type but does not preserve permutations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnePointCrossover;

impl OnePointCrossover {
    /// Produces the two offspring for an explicit cut point.
    ///
    /// Parents must have equal length and `cut` must not exceed it.
    pub fn cross_at<G: Clone>(
        parent1: &[G],
        parent2: &[G],
        cut: usize,
    ) -> Result<(Individual<G>, Individual<G>)> {
        check_pair(parent1, parent2)?;
        if cut > parent1.len() {
            return Err(OptimError::InvalidConfig(format!(
                "cut {cut} out of range for individuals of length {}",
                parent1.len()
            )));
        }
        let mut child1 = parent2[..cut].to_vec();
        child1.extend_from_slice(&parent1[cut..]);
        let mut child2 = parent1[..cut].to_vec();
        child2.extend_from_slice(&parent2[cut..]);
        Ok((child1, child2))
    }
}

impl<G: Clone> Crossover<G> for OnePointCrossover {
    fn crossover(
        &self,
        population: &Population<G>,
        parents: &[usize],
        rng: &mut dyn RngCore,
    ) -> Result<Population<G>> {
        let n = check_shapes(population, parents, CUT_MIN_GENES)?;
        let mut offspring = Vec::with_capacity(population.len());
        for pair in parents.chunks_exact(2) {
            let cut = rng.random_range(1..=n - 2);
            let (c1, c2) = Self::cross_at(&population[pair[0]], &population[pair[1]], cut)?;
            offspring.push(c1);
            offspring.push(c2);
        }
        Ok(offspring)
    }

    fn name(&self) -> &'static str {
        "one-point"
    }
}

// ============================================================================
// Order crossover (OX)
// ============================================================================

/// Order crossover for permutations of `0..n`.
///
/// Cuts `c1` in `[1, n - 2]` and `c2` in `[c1, n - 1]` delimit the
/// segment `[c1, c2)`. Each offspring receives the *other* parent's
/// segment in place; its remaining slots are filled, starting at `c2` and
/// wrapping, with its own parent's values read from `c2` onwards
/// (wrapping), skipping values already present.
///
/// Offspring are valid permutations whenever both parents are; parents
/// holding values outside `0..n` or duplicates are rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderCrossover;

impl OrderCrossover {
    /// Produces the two offspring for explicit cut points `c1 <= c2 <= n`.
    ///
    /// Both parents must be permutations of `0..n`.
    pub fn cross_at(
        parent1: &[usize],
        parent2: &[usize],
        c1: usize,
        c2: usize,
    ) -> Result<(Individual<usize>, Individual<usize>)> {
        check_pair(parent1, parent2)?;
        ensure_permutation(parent1)?;
        ensure_permutation(parent2)?;
        let n = parent1.len();
        if c1 > c2 || c2 > n {
            return Err(OptimError::InvalidConfig(format!(
                "cuts ({c1}, {c2}) must satisfy c1 <= c2 <= {n}"
            )));
        }
        if n == 0 {
            return Ok((Vec::new(), Vec::new()));
        }
        Ok(ox_pair(parent1, parent2, c1, c2))
    }
}

/// Both offspring of one OX pairing; inputs are already validated.
fn ox_pair(
    parent1: &[usize],
    parent2: &[usize],
    c1: usize,
    c2: usize,
) -> (Individual<usize>, Individual<usize>) {
    (
        ox_build_child(parent2, parent1, c1, c2),
        ox_build_child(parent1, parent2, c1, c2),
    )
}

/// Copy `segment_donor[c1..c2]`, then fill the rest from `filler`.
fn ox_build_child(segment_donor: &[usize], filler: &[usize], c1: usize, c2: usize) -> Vec<usize> {
    let n = filler.len();
    let mut child = vec![usize::MAX; n];
    let mut placed = vec![false; n];

    for i in c1..c2 {
        child[i] = segment_donor[i];
        placed[segment_donor[i]] = true;
    }

    // Free slots are exactly c2..n followed by 0..c1.
    let mut pos = c2 % n;
    for offset in 0..n {
        let val = filler[(c2 + offset) % n];
        if !placed[val] {
            child[pos] = val;
            placed[val] = true;
            pos = (pos + 1) % n;
        }
    }

    child
}

fn check_pair<G>(parent1: &[G], parent2: &[G]) -> Result<()> {
    if parent1.len() != parent2.len() {
        return Err(OptimError::shape(
            "individual length",
            parent1.len(),
            parent2.len(),
        ));
    }
    Ok(())
}

fn ensure_permutation(individual: &[usize]) -> Result<()> {
    let n = individual.len();
    let mut seen = vec![false; n];
    for &v in individual {
        if v >= n || seen[v] {
            return Err(OptimError::InvalidGene(format!(
                "{individual:?} is not a permutation of 0..{n}"
            )));
        }
        seen[v] = true;
    }
    Ok(())
}

impl Crossover<usize> for OrderCrossover {
    fn crossover(
        &self,
        population: &Population<usize>,
        parents: &[usize],
        rng: &mut dyn RngCore,
    ) -> Result<Population<usize>> {
        let n = check_shapes(population, parents, CUT_MIN_GENES)?;
        for individual in population {
            ensure_permutation(individual)?;
        }

        let mut offspring = Vec::with_capacity(population.len());
        for pair in parents.chunks_exact(2) {
            let c1 = rng.random_range(1..=n - 2);
            let c2 = rng.random_range(c1..=n - 1);
            let (a, b) = ox_pair(&population[pair[0]], &population[pair[1]], c1, c2);
            offspring.push(a);
            offspring.push(b);
        }
        Ok(offspring)
    }

    fn name(&self) -> &'static str {
        "order"
    }
}

// ============================================================================
// Blend crossover (BLX-αβ)
// ============================================================================

/// Blend crossover for real-valued genes.
///
/// For each gene pair `(x1, x2)` with `d = |x1 - x2|` the sampling interval
/// is widened by `β·d` on the first parent's side and `α·d` on the second
/// parent's side:
///
/// - `x1 < x2`: `[x1 - β·d, x2 + α·d]`
/// - otherwise: `[x2 - α·d, x1 + β·d]`
///
/// Both offspring genes are drawn independently and uniformly from the
/// interval (bounds inclusive). Selection puts the fitter parent first,
/// so `β` tunes exploration around the fitter parent.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlendCrossover {
    alpha: f64,
    beta: f64,
}

impl Default for BlendCrossover {
    fn default() -> Self {
        Self {
            alpha: 0.01,
            beta: 0.01,
        }
    }
}

impl BlendCrossover {
    /// Creates a blend crossover. Negative or NaN coefficients become 0.
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self {
            alpha: alpha.max(0.0),
            beta: beta.max(0.0),
        }
    }

    /// Widening coefficient on the second parent's side.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Widening coefficient on the first parent's side.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Sampling interval `[linf, lsup]` for one gene pair.
    pub fn interval(&self, x1: f64, x2: f64) -> (f64, f64) {
        let diff = (x1 - x2).abs();
        if x1 < x2 {
            (x1 - self.beta * diff, x2 + self.alpha * diff)
        } else {
            (x2 - self.alpha * diff, x1 + self.beta * diff)
        }
    }

    fn sample_gene(&self, x1: f64, x2: f64, rng: &mut dyn RngCore) -> Result<(f64, f64)> {
        let (linf, lsup) = self.interval(x1, x2);
        if !linf.is_finite() || !lsup.is_finite() {
            return Err(OptimError::NumericalHazard(format!(
                "blend interval for genes {x1} and {x2} is not finite"
            )));
        }
        let width = lsup - linf;
        let mut draw = || (linf + rng.random::<f64>() * width).max(linf).min(lsup);
        Ok((draw(), draw()))
    }
}

impl Crossover<f64> for BlendCrossover {
    fn crossover(
        &self,
        population: &Population<f64>,
        parents: &[usize],
        rng: &mut dyn RngCore,
    ) -> Result<Population<f64>> {
        let n = check_shapes(population, parents, 1)?;
        let mut offspring = Vec::with_capacity(population.len());
        for pair in parents.chunks_exact(2) {
            let (p1, p2) = (&population[pair[0]], &population[pair[1]]);
            let mut child1 = Vec::with_capacity(n);
            let mut child2 = Vec::with_capacity(n);
            for (&x1, &x2) in p1.iter().zip(p2) {
                let (g1, g2) = self.sample_gene(x1, x2, rng)?;
                child1.push(g1);
                child2.push(g2);
            }
            offspring.push(child1);
            offspring.push(child2);
        }
        Ok(offspring)
    }

    fn name(&self) -> &'static str {
        "blend"
    }
}

// ============================================================================
// Tests
// ============================================================================
