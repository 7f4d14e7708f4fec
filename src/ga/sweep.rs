//! Exhaustive hyperparameter grid search over GA runs.
//!
//! [`GridSearch`] evaluates every combination of population size,
//! generation count, mutation rate, and operator triple. Each point is run
//! `repeats` times with fresh runners and scored by the mean best fitness.

use super::config::GaConfig;
use super::crossover::Crossover;
use super::mutation::Mutation;
use super::runner::GaRunner;
use super::selection::Selection;
use super::types::GaProblem;
use crate::error::{OptimError, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// One point of the parameter grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SweepPoint {
    pub population_size: usize,
    pub generations: usize,
    pub mutation_rate: f64,
    /// Name of the selection strategy.
    pub selection: &'static str,
    /// Name of the crossover strategy.
    pub crossover: &'static str,
    /// Name of the mutation strategy.
    pub mutation: &'static str,
}

/// Result of a grid search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SweepOutcome {
    /// The grid point with the best mean fitness.
    pub best: SweepPoint,

    /// Mean best fitness of `best` across its repeats.
    pub mean_fitness: f64,

    /// Number of grid points evaluated.
    pub points_evaluated: usize,
}

/// Grid search over GA hyperparameters and operators.
///
/// The base [`GaConfig`] supplies the direction, seed, and verbosity;
/// every other field is taken from the grid axes. When the base config has
/// a seed, repeat `r` runs with `seed + r`, so the whole sweep is
/// reproducible.
///
/// # Usage
///
/// ```ignore
/// let outcome = GridSearch::new(GaConfig::default().with_seed(1))
///     .with_population_sizes(vec![20, 40])
///     .with_generations(vec![100])
///     .with_mutation_rates(vec![0.05, 0.1])
///     .with_selection(TournamentSelection)
///     .with_crossover(OrderCrossover)
///     .with_mutation(SwapMutation)
///     .run(&problem)?;
/// ```
pub struct GridSearch<G> {
    base: GaConfig,
    population_sizes: Vec<usize>,
    generations: Vec<usize>,
    mutation_rates: Vec<f64>,
    selections: Vec<Arc<dyn Selection>>,
    crossovers: Vec<Arc<dyn Crossover<G>>>,
    mutations: Vec<Arc<dyn Mutation<G>>>,
    repeats: usize,
}

impl<G: Clone + 'static> GridSearch<G> {
    /// Creates an empty grid. Every axis must receive at least one value
    /// before [`run`](Self::run).
    pub fn new(base: GaConfig) -> Self {
        Self {
            base,
            population_sizes: Vec::new(),
            generations: Vec::new(),
            mutation_rates: Vec::new(),
            selections: Vec::new(),
            crossovers: Vec::new(),
            mutations: Vec::new(),
            repeats: 10,
        }
    }

    pub fn with_population_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.population_sizes = sizes;
        self
    }

    pub fn with_generations(mut self, generations: Vec<usize>) -> Self {
        self.generations = generations;
        self
    }

    pub fn with_mutation_rates(mut self, rates: Vec<f64>) -> Self {
        self.mutation_rates = rates;
        self
    }

    /// Adds a selection strategy to the grid.
    pub fn with_selection(mut self, selection: impl Selection + 'static) -> Self {
        self.selections.push(Arc::new(selection));
        self
    }

    /// Adds a crossover strategy to the grid.
    pub fn with_crossover(mut self, crossover: impl Crossover<G> + 'static) -> Self {
        self.crossovers.push(Arc::new(crossover));
        self
    }

    /// Adds a mutation strategy to the grid.
    pub fn with_mutation(mut self, mutation: impl Mutation<G> + 'static) -> Self {
        self.mutations.push(Arc::new(mutation));
        self
    }

    /// Sets the number of runs per grid point (at least 1).
    pub fn with_repeats(mut self, repeats: usize) -> Self {
        self.repeats = repeats.max(1);
        self
    }

    /// Number of grid points [`run`](Self::run) will evaluate.
    pub fn point_count(&self) -> usize {
        self.population_sizes.len()
            * self.generations.len()
            * self.mutation_rates.len()
            * self.selections.len()
            * self.crossovers.len()
            * self.mutations.len()
    }

    /// Runs every grid point and returns the best one.
    ///
    /// # Errors
    ///
    /// [`OptimError::InvalidConfig`] if any axis is empty. Any error from a
    /// single run aborts the whole sweep.
    pub fn run<P>(&self, problem: &P) -> Result<SweepOutcome>
    where
        P: GaProblem<Gene = G>,
    {
        self.ensure_axes()?;
        let direction = self.base.direction;
        let total = self.point_count();
        info!(points = total, repeats = self.repeats, "starting grid search");

        let mut best: Option<(SweepPoint, f64)> = None;

        for &population_size in &self.population_sizes {
            for &generations in &self.generations {
                for &mutation_rate in &self.mutation_rates {
                    for selection in &self.selections {
                        for crossover in &self.crossovers {
                            for mutation in &self.mutations {
                                let config = GaConfig {
                                    population_size,
                                    generations,
                                    mutation_rate,
                                    ..self.base.clone()
                                };
                                let mean = self.mean_fitness(
                                    problem,
                                    config,
                                    selection,
                                    crossover,
                                    mutation,
                                )?;
                                let point = SweepPoint {
                                    population_size,
                                    generations,
                                    mutation_rate,
                                    selection: selection.name(),
                                    crossover: crossover.name(),
                                    mutation: mutation.name(),
                                };
                                debug!(?point, mean, "grid point evaluated");

                                let improved = match &best {
                                    Some((_, incumbent)) => direction.is_better(mean, *incumbent),
                                    None => true,
                                };
                                if improved {
                                    best = Some((point, mean));
                                }
                            }
                        }
                    }
                }
            }
        }

        let (point, mean_fitness) = best.ok_or_else(|| {
            OptimError::InvalidConfig("grid search evaluated no points".into())
        })?;
        info!(best = ?point, mean_fitness, "grid search finished");

        Ok(SweepOutcome {
            best: point,
            mean_fitness,
            points_evaluated: total,
        })
    }

    fn mean_fitness<P>(
        &self,
        problem: &P,
        config: GaConfig,
        selection: &Arc<dyn Selection>,
        crossover: &Arc<dyn Crossover<G>>,
        mutation: &Arc<dyn Mutation<G>>,
    ) -> Result<f64>
    where
        P: GaProblem<Gene = G>,
    {
        let base_seed = config.seed;
        let mut runner = GaRunner::new(config);
        runner.set_shared_selection(Arc::clone(selection));
        runner.set_shared_crossover(Arc::clone(crossover));
        runner.set_shared_mutation(Arc::clone(mutation));

        let mut sum = 0.0;
        for repeat in 0..self.repeats {
            if let Some(seed) = base_seed {
                runner.reseed(seed.wrapping_add(repeat as u64));
            }
            sum += runner.simulate(problem)?.best_fitness;
        }
        Ok(sum / self.repeats as f64)
    }

    fn ensure_axes(&self) -> Result<()> {
        let axes = [
            ("population_sizes", self.population_sizes.len()),
            ("generations", self.generations.len()),
            ("mutation_rates", self.mutation_rates.len()),
            ("selections", self.selections.len()),
            ("crossovers", self.crossovers.len()),
            ("mutations", self.mutations.len()),
        ];
        for (axis, len) in axes {
            if len == 0 {
                return Err(OptimError::InvalidConfig(format!(
                    "grid search axis `{axis}` is empty"
                )));
            }
        }
        Ok(())
    }
}
