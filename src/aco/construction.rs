//! Probabilistic tour construction.
//!
//! An ant standing at city `i` moves to an unvisited city `j` with
//! probability proportional to `τ[i][j]^α · (1 / d[i][j])^β`.

use super::pheromone::PheromoneMatrix;
use super::types::{DistanceMatrix, Tour};
use crate::error::{OptimError, Result};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::RngCore;

/// Builds ant tours from the current pheromone matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AntConstructor {
    alpha: f64,
    beta: f64,
}

impl AntConstructor {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Builds `count` tours; ant `k` starts at city `k mod n`.
    pub fn build_tours(
        &self,
        pheromones: &PheromoneMatrix,
        distances: &DistanceMatrix,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Tour>> {
        if pheromones.len() != distances.len() {
            return Err(OptimError::shape(
                "pheromone matrix",
                distances.len(),
                pheromones.len(),
            ));
        }
        let n = distances.len();
        if n == 0 {
            return Err(OptimError::InvalidConfig(
                "cannot build tours over zero cities".into(),
            ));
        }
        (0..count)
            .map(|k| self.build_tour(k % n, pheromones, distances, rng))
            .collect()
    }

    /// Builds one tour starting at `start`.
    pub fn build_tour(
        &self,
        start: usize,
        pheromones: &PheromoneMatrix,
        distances: &DistanceMatrix,
        rng: &mut dyn RngCore,
    ) -> Result<Tour> {
        let n = distances.len();
        if start >= n {
            return Err(OptimError::InvalidGene(format!(
                "start city {start} outside {n} cities"
            )));
        }

        let mut visited = vec![false; n];
        let mut tour = Vec::with_capacity(n);
        visited[start] = true;
        tour.push(start);

        let mut candidates = Vec::with_capacity(n);
        let mut weights = Vec::with_capacity(n);

        for _ in 1..n {
            let current = tour[tour.len() - 1];
            candidates.clear();
            weights.clear();
            for j in (0..n).filter(|&j| !visited[j]) {
                candidates.push(j);
                weights.push(self.weight(current, j, pheromones, distances)?);
            }

            let total: f64 = weights.iter().sum();
            if !(total.is_finite() && total > 0.0) {
                return Err(OptimError::NumericalHazard(format!(
                    "transition weights from city {current} sum to {total}"
                )));
            }
            let dist = WeightedIndex::new(&weights).map_err(|e| {
                OptimError::NumericalHazard(format!(
                    "transition weights from city {current} cannot be normalized: {e}"
                ))
            })?;
            let next = candidates[dist.sample(rng)];
            visited[next] = true;
            tour.push(next);
        }
        Ok(tour)
    }

    fn weight(
        &self,
        from: usize,
        to: usize,
        pheromones: &PheromoneMatrix,
        distances: &DistanceMatrix,
    ) -> Result<f64> {
        let d = distances.get(from, to);
        if d <= 0.0 {
            return Err(OptimError::NumericalHazard(format!(
                "edge {from} → {to} has non-positive distance {d}; \
                 use DistanceMatrix::with_zero_floor"
            )));
        }
        Ok(pheromones.get(from, to).powf(self.alpha) * (1.0 / d).powf(self.beta))
    }
}
