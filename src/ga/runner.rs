//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates one generation as
//! evaluation → selection → crossover → mutation → elitism → replacement,
//! for a fixed number of generations.

use super::config::GaConfig;
use super::crossover::Crossover;
use super::mutation::Mutation;
use super::selection::Selection;
use super::types::{GaProblem, Population};
use crate::direction::best_index;
use crate::error::{OptimError, Result};
use crate::random::rng_from;
use std::sync::Arc;
use tracing::{debug, info};

/// Result of a GA optimization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult<G> {
    /// The best individual of the final population.
    ///
    /// With elitism this is at least as good as every earlier generation's
    /// best.
    pub best: Vec<G>,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Number of generations executed (always the configured budget).
    pub generations: usize,

    /// Best fitness of each generation, followed by the final population's
    /// best (`generations + 1` entries).
    pub fitness_history: Vec<f64>,

    /// Every evaluated population, aligned with `fitness_history`.
    ///
    /// Empty unless [`GaConfig::keep_history`] is set.
    pub population_history: Vec<Population<G>>,
}

/// Executes the GA evolutionary loop.
///
/// Operators are configured once and shared through [`Arc`], so one
/// runner (or one operator instance) can serve many independent runs.
///
/// # Usage
///
/// ```ignore
/// let runner = GaRunner::new(GaConfig::default().with_seed(42))
///     .with_selection(TournamentSelection)
///     .with_crossover(OrderCrossover)
///     .with_mutation(SwapMutation);
/// let result = runner.simulate(&problem)?;
/// println!("Best fitness: {}", result.best_fitness);
/// ```
pub struct GaRunner<G> {
    config: GaConfig,
    selection: Option<Arc<dyn Selection>>,
    crossover: Option<Arc<dyn Crossover<G>>>,
    mutation: Option<Arc<dyn Mutation<G>>>,
}

impl<G: Clone + 'static> GaRunner<G> {
    /// Creates a runner with no operators configured.
    pub fn new(config: GaConfig) -> Self {
        Self {
            config,
            selection: None,
            crossover: None,
            mutation: None,
        }
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Replaces the seed used by the next [`simulate`](Self::simulate).
    pub(crate) fn reseed(&mut self, seed: u64) {
        self.config.seed = Some(seed);
    }

    /// Sets the selection strategy.
    pub fn set_selection(&mut self, selection: impl Selection + 'static) {
        self.selection = Some(Arc::new(selection));
    }

    /// Sets the crossover strategy.
    pub fn set_crossover(&mut self, crossover: impl Crossover<G> + 'static) {
        self.crossover = Some(Arc::new(crossover));
    }

    /// Sets the mutation strategy.
    pub fn set_mutation(&mut self, mutation: impl Mutation<G> + 'static) {
        self.mutation = Some(Arc::new(mutation));
    }

    /// Sets a selection strategy instance shared with other runners.
    pub fn set_shared_selection(&mut self, selection: Arc<dyn Selection>) {
        self.selection = Some(selection);
    }

    /// Sets a crossover strategy instance shared with other runners.
    pub fn set_shared_crossover(&mut self, crossover: Arc<dyn Crossover<G>>) {
        self.crossover = Some(crossover);
    }

    /// Sets a mutation strategy instance shared with other runners.
    pub fn set_shared_mutation(&mut self, mutation: Arc<dyn Mutation<G>>) {
        self.mutation = Some(mutation);
    }

    /// Builder form of [`set_selection`](Self::set_selection).
    pub fn with_selection(mut self, selection: impl Selection + 'static) -> Self {
        self.set_selection(selection);
        self
    }

    /// Builder form of [`set_crossover`](Self::set_crossover).
    pub fn with_crossover(mut self, crossover: impl Crossover<G> + 'static) -> Self {
        self.set_crossover(crossover);
        self
    }

    /// Builder form of [`set_mutation`](Self::set_mutation).
    pub fn with_mutation(mut self, mutation: impl Mutation<G> + 'static) -> Self {
        self.set_mutation(mutation);
        self
    }

    /// Runs the GA for the configured number of generations.
    ///
    /// # Errors
    ///
    /// - [`OptimError::MissingStrategy`] if selection, crossover, or
    ///   mutation is unset (checked before anything else runs).
    /// - [`OptimError::InvalidConfig`] if the configuration is invalid.
    /// - Any error raised by the problem's output shape or an operator; the
    ///   whole run is aborted.
    pub fn simulate<P>(&self, problem: &P) -> Result<GaResult<G>>
    where
        P: GaProblem<Gene = G>,
    {
        let selection = self
            .selection
            .as_deref()
            .ok_or(OptimError::MissingStrategy("selection"))?;
        let crossover = self
            .crossover
            .as_deref()
            .ok_or(OptimError::MissingStrategy("crossover"))?;
        let mutation = self
            .mutation
            .as_deref()
            .ok_or(OptimError::MissingStrategy("mutation"))?;
        self.config.validate()?;

        let config = &self.config;
        let size = config.population_size;
        let direction = config.direction;
        let mut rng = rng_from(config.seed);

        info!(
            population = size,
            generations = config.generations,
            mutation_rate = config.mutation_rate,
            ?direction,
            selection = selection.name(),
            crossover = crossover.name(),
            mutation = mutation.name(),
            "starting GA run"
        );

        let mut population = problem.create_individuals(size, &mut rng);
        ensure_size("initial population", &population, size)?;

        let mut fitness_history = Vec::with_capacity(config.generations + 1);
        let mut population_history = Vec::new();

        for generation in 0..config.generations {
            let fitness = evaluate(problem, &population, size)?;
            let best = best_of(&fitness, config)?;
            let best_fitness = fitness[best];
            fitness_history.push(best_fitness);
            if config.keep_history {
                population_history.push(population.clone());
            }
            if config.verbose {
                info!(generation, best_fitness, "generation finished evaluation");
            } else {
                debug!(generation, best_fitness, "generation finished evaluation");
            }

            let parents = selection.select(&fitness, direction, &mut rng)?;
            let offspring = crossover.crossover(&population, &parents, &mut rng)?;
            let mut offspring = mutation.mutate(&offspring, config.mutation_rate, &mut rng)?;
            ensure_size("offspring", &offspring, size)?;

            // Elitism
            offspring[0] = population[best].clone();

            problem.on_generation(generation, best_fitness);
            population = offspring;
        }

        let fitness = evaluate(problem, &population, size)?;
        let best = best_of(&fitness, config)?;
        let best_fitness = fitness[best];
        fitness_history.push(best_fitness);
        if config.keep_history {
            population_history.push(population.clone());
        }

        info!(best_fitness, generations = config.generations, "GA run finished");

        Ok(GaResult {
            best: population.swap_remove(best),
            best_fitness,
            generations: config.generations,
            fitness_history,
            population_history,
        })
    }
}

fn ensure_size<G>(what: &'static str, population: &Population<G>, size: usize) -> Result<()> {
    if population.len() != size {
        return Err(OptimError::shape(what, size, population.len()));
    }
    Ok(())
}

/// Scores the population, rejecting misaligned or NaN fitness vectors.
fn evaluate<P: GaProblem>(
    problem: &P,
    population: &Population<P::Gene>,
    size: usize,
) -> Result<Vec<f64>> {
    let fitness = problem.fitness(population);
    if fitness.len() != size {
        return Err(OptimError::shape("fitness vector", size, fitness.len()));
    }
    if let Some(i) = fitness.iter().position(|f| f.is_nan()) {
        return Err(OptimError::NumericalHazard(format!(
            "fitness of individual {i} is NaN"
        )));
    }
    Ok(fitness)
}

fn best_of(fitness: &[f64], config: &GaConfig) -> Result<usize> {
    best_index(fitness, config.direction)
        .ok_or_else(|| OptimError::shape("fitness vector", config.population_size, 0))
}

// ============================================================================
// Tests
// ============================================================================
