//! PSO swarm loop execution.

use super::config::PsoConfig;
use super::swarm::Swarm;
use super::types::{Position, PsoProblem};
use crate::direction::best_index;
use crate::error::{OptimError, Result};
use crate::random::rng_from;
use tracing::{debug, info};

/// Result of a PSO run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoResult {
    /// Best position evaluated in any generation.
    pub best_position: Position,

    /// Fitness of `best_position`.
    pub best_fitness: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Best fitness of each generation's swarm.
    pub fitness_history: Vec<f64>,

    /// Positions evaluated in each generation, in particle order.
    ///
    /// Empty unless [`PsoConfig::keep_history`] is set.
    pub position_history: Vec<Vec<Position>>,
}

/// Executes the PSO loop.
///
/// PSO has no pluggable operators; the dynamics are fully described by
/// [`PsoConfig`].
///
/// # Usage
///
/// ```ignore
/// let config = PsoConfig::default().with_dimensions(2).with_seed(42);
/// let result = PsoRunner::new(config).simulate(&Sphere)?;
/// ```
#[derive(Debug, Clone)]
pub struct PsoRunner {
    config: PsoConfig,
}

impl PsoRunner {
    pub fn new(config: PsoConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PsoConfig {
        &self.config
    }

    /// Runs the swarm for the configured number of generations.
    ///
    /// Each generation evaluates the swarm, refreshes personal bests, takes
    /// the best evaluated position as the swarm best, then moves every
    /// particle.
    pub fn simulate<P: PsoProblem>(&self, problem: &P) -> Result<PsoResult> {
        self.config.validate()?;
        let config = &self.config;
        let direction = config.direction;
        let mut rng = rng_from(config.seed);

        info!(
            particles = config.particle_count,
            dimensions = config.dimensions,
            generations = config.generations,
            ?direction,
            "starting PSO run"
        );

        let positions = problem.create_particles(
            config.particle_count,
            config.dimensions,
            config.position_bounds,
            &mut rng,
        );
        if positions.len() != config.particle_count {
            return Err(OptimError::shape(
                "initial swarm",
                config.particle_count,
                positions.len(),
            ));
        }
        let mut swarm = Swarm::new(positions, config.dimensions, direction)?;

        let mut best_fitness = direction.worst();
        let mut best_position: Option<Position> = None;
        let mut fitness_history = Vec::with_capacity(config.generations);
        let mut position_history = Vec::new();

        for generation in 0..config.generations {
            let positions = swarm.positions();
            let fitness = problem.fitness(&positions);
            if fitness.len() != positions.len() {
                return Err(OptimError::shape(
                    "fitness vector",
                    positions.len(),
                    fitness.len(),
                ));
            }
            if let Some(i) = fitness.iter().position(|f| f.is_nan()) {
                return Err(OptimError::NumericalHazard(format!(
                    "fitness of particle {i} is NaN"
                )));
            }

            swarm.update_personal_bests(&fitness, direction)?;

            let Some(leader) = best_index(&fitness, direction) else {
                return Err(OptimError::shape("fitness vector", config.particle_count, 0));
            };
            let generation_best = fitness[leader];
            fitness_history.push(generation_best);
            if config.verbose {
                info!(generation, best_fitness = generation_best, "generation finished");
            } else {
                debug!(generation, best_fitness = generation_best, "generation finished");
            }

            if best_position.is_none() || direction.is_better(generation_best, best_fitness) {
                best_fitness = generation_best;
                best_position = Some(positions[leader].clone());
            }

            swarm.step(&positions[leader], config, &mut rng)?;
            if config.keep_history {
                position_history.push(positions);
            }
        }

        let best_position = best_position.ok_or_else(|| {
            OptimError::InvalidConfig("PSO run executed no generations".into())
        })?;
        info!(best_fitness, "PSO run finished");

        Ok(PsoResult {
            best_position,
            best_fitness,
            generations: config.generations,
            fitness_history,
            position_history,
        })
    }
}
