//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::direction::Direction;
use crate::error::{OptimError, Result};

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_swarmevo::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 500);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_swarmevo::ga::GaConfig;
/// use u_swarmevo::Direction;
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_direction(Direction::Maximize)
///     .with_mutation_rate(0.05)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    ///
    /// Must be even (parents are consumed in pairs) and at least 4
    /// (tournament selection draws four distinct candidates per pair).
    pub population_size: usize,

    /// Number of generations to run. There is no early stopping.
    pub generations: usize,

    /// Rate handed to the mutation operator each generation (0.0–1.0).
    ///
    /// Whether it is per gene or per individual depends on the operator.
    pub mutation_rate: f64,

    /// Whether lower or higher fitness is better.
    pub direction: Direction,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Log every generation's best fitness at `info` level instead of
    /// `debug`.
    pub verbose: bool,

    /// Keep a copy of every generation's population in the result.
    ///
    /// Off by default; the copies grow with `generations × population_size`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub keep_history: bool,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 500,
            mutation_rate: 0.1,
            direction: Direction::Minimize,
            seed: None,
            verbose: false,
            keep_history: false,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the optimization direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables per-generation progress logging at `info` level.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Records every generation's population in the result.
    pub fn with_history(mut self, keep: bool) -> Self {
        self.keep_history = keep;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 4 {
            return Err(OptimError::InvalidConfig(
                "population_size must be at least 4".into(),
            ));
        }
        if self.population_size % 2 != 0 {
            return Err(OptimError::InvalidConfig(
                "population_size must be even".into(),
            ));
        }
        if self.generations == 0 {
            return Err(OptimError::InvalidConfig(
                "generations must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(OptimError::InvalidConfig(
                "mutation_rate must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}
