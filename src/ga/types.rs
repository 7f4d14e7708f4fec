//! Core trait definitions for the GA framework.
//!
//! [`GaProblem`] is the contract between the generic GA engine and a
//! domain-specific encoding. The engine never looks inside an individual;
//! only the operators picked for a run assume a representation.

use rand::Rng;

/// One candidate solution: a fixed-length gene vector.
pub type Individual<G> = Vec<G>;

/// A whole generation, in slot order.
pub type Population<G> = Vec<Individual<G>>;

/// Defines a GA optimization problem.
///
/// The problem owns the encoding: it creates the initial population and
/// scores populations. Selection, crossover, and mutation are configured
/// separately on the [`GaRunner`](super::GaRunner).
///
/// # Examples
///
/// ```ignore
/// struct OneMax { bits: usize }
///
/// impl GaProblem for OneMax {
///     type Gene = u8;
///
///     fn create_individuals<R: Rng>(&self, count: usize, rng: &mut R) -> Population<u8> {
///         (0..count)
///             .map(|_| (0..self.bits).map(|_| rng.random_range(0..=1)).collect())
///             .collect()
///     }
///
///     fn fitness(&self, population: &Population<u8>) -> Vec<f64> {
///         population.iter().map(|ind| ind.iter().map(|&b| b as f64).sum()).collect()
///     }
/// }
/// ```
pub trait GaProblem {
    /// Gene type of the encoding (`u8` for bits, `f64` for reals,
    /// `usize` for permutations).
    type Gene: Clone;

    /// Creates the initial population of `count` individuals.
    fn create_individuals<R: Rng>(&self, count: usize, rng: &mut R) -> Population<Self::Gene>;

    /// Scores every individual. The result must be positionally aligned
    /// with `population`.
    fn fitness(&self, population: &Population<Self::Gene>) -> Vec<f64>;

    /// Called at the end of each generation with that generation's best
    /// fitness.
    ///
    /// The default implementation is a no-op.
    fn on_generation(&self, _generation: usize, _best_fitness: f64) {}
}
