//! Problem definition for PSO.

use rand::Rng;

/// A point in the search space.
pub type Position = Vec<f64>;

/// Defines a PSO optimization problem over real vectors.
///
/// # Examples
///
/// ```ignore
/// struct Sphere;
///
/// impl PsoProblem for Sphere {
///     fn fitness(&self, positions: &[Position]) -> Vec<f64> {
///         positions.iter().map(|p| p.iter().map(|x| x * x).sum()).collect()
///     }
/// }
/// ```
pub trait PsoProblem {
    /// Creates the initial swarm positions.
    ///
    /// The default samples every component uniformly from `bounds`.
    fn create_particles<R: Rng>(
        &self,
        count: usize,
        dimensions: usize,
        bounds: (f64, f64),
        rng: &mut R,
    ) -> Vec<Position> {
        let (lo, hi) = bounds;
        (0..count)
            .map(|_| (0..dimensions).map(|_| rng.random_range(lo..=hi)).collect())
            .collect()
    }

    /// Scores every position, positionally aligned with `positions`.
    fn fitness(&self, positions: &[Position]) -> Vec<f64>;
}
