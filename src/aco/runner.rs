//! ACO colony loop execution.

use super::config::AcoConfig;
use super::construction::AntConstructor;
use super::pheromone::{PheromoneMatrix, PheromoneUpdate};
use super::types::{AcoProblem, Tour};
use crate::direction::{best_index, Direction};
use crate::error::{OptimError, Result};
use crate::random::rng_from;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of an ACO run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// Cheapest tour seen in any generation.
    pub best_tour: Tour,

    /// Cost of `best_tour`.
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Cheapest tour cost of each generation.
    pub fitness_history: Vec<f64>,

    /// Every generation's tours, in ant order.
    ///
    /// Empty unless [`AcoConfig::keep_history`] is set.
    pub tour_history: Vec<Vec<Tour>>,
}

/// Executes the ACO loop: construct tours, score them, update pheromones.
///
/// The pheromone matrix starts at [`AcoConfig::initial_pheromone`] and
/// persists across generations of one run.
///
/// # Usage
///
/// ```ignore
/// let runner = AcoRunner::new(AcoConfig::default().with_seed(7))
///     .with_pheromone_update(ElitistUpdate::new(100.0, 0.5, 2.0)?);
/// let result = runner.simulate(&tsp)?;
/// ```
pub struct AcoRunner {
    config: AcoConfig,
    update: Option<Arc<dyn PheromoneUpdate>>,
}

impl AcoRunner {
    pub fn new(config: AcoConfig) -> Self {
        Self {
            config,
            update: None,
        }
    }

    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Sets the pheromone update policy.
    pub fn set_pheromone_update(&mut self, update: impl PheromoneUpdate + 'static) {
        self.update = Some(Arc::new(update));
    }

    /// Sets a policy instance shared with other runners.
    pub fn set_shared_pheromone_update(&mut self, update: Arc<dyn PheromoneUpdate>) {
        self.update = Some(update);
    }

    /// Builder form of [`set_pheromone_update`](Self::set_pheromone_update).
    pub fn with_pheromone_update(mut self, update: impl PheromoneUpdate + 'static) -> Self {
        self.set_pheromone_update(update);
        self
    }

    /// Runs the colony for the configured number of generations.
    ///
    /// # Errors
    ///
    /// - [`OptimError::MissingStrategy`] if no pheromone update is set.
    /// - [`OptimError::InvalidConfig`] if the configuration is invalid.
    /// - Any construction, fitness, or update error; the run is aborted.
    pub fn simulate<P: AcoProblem>(&self, problem: &P) -> Result<AcoResult> {
        let update = self
            .update
            .as_deref()
            .ok_or(OptimError::MissingStrategy("pheromone update"))?;
        self.config.validate()?;

        let config = &self.config;
        let distances = problem.distances();
        let constructor = AntConstructor::new(config.alpha, config.beta);
        let mut rng = rng_from(config.seed);
        let mut pheromones =
            PheromoneMatrix::filled(distances.len(), config.initial_pheromone)?;

        info!(
            cities = distances.len(),
            ants = config.ant_count,
            generations = config.generations,
            update = update.name(),
            "starting ACO run"
        );

        let mut best: Option<(Tour, f64)> = None;
        let mut fitness_history = Vec::with_capacity(config.generations);
        let mut tour_history = Vec::new();

        for generation in 0..config.generations {
            let tours =
                constructor.build_tours(&pheromones, distances, config.ant_count, &mut rng)?;
            let fitness = problem.fitness(&tours)?;
            if fitness.len() != tours.len() {
                return Err(OptimError::shape("fitness vector", tours.len(), fitness.len()));
            }

            pheromones = update.update(pheromones, &tours, &fitness)?;

            let Some(cheapest) = best_index(&fitness, Direction::Minimize) else {
                return Err(OptimError::NumericalHazard(
                    "no comparable tour cost in generation".into(),
                ));
            };
            let generation_best = fitness[cheapest];
            fitness_history.push(generation_best);
            if config.verbose {
                info!(generation, best_fitness = generation_best, "generation finished");
            } else {
                debug!(generation, best_fitness = generation_best, "generation finished");
            }

            let improved = match &best {
                Some((_, incumbent)) => generation_best < *incumbent,
                None => true,
            };
            if improved {
                best = Some((tours[cheapest].clone(), generation_best));
            }
            if config.keep_history {
                tour_history.push(tours);
            }
        }

        let (best_tour, best_fitness) = best.ok_or_else(|| {
            OptimError::InvalidConfig("ACO run executed no generations".into())
        })?;
        info!(best_fitness, "ACO run finished");

        Ok(AcoResult {
            best_tour,
            best_fitness,
            generations: config.generations,
            fitness_history,
            tour_history,
        })
    }
}
