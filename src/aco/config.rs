//! ACO configuration.

use crate::error::{OptimError, Result};

/// Configuration for Ant Colony Optimization.
///
/// ACO always minimizes tour cost, so there is no direction field.
///
/// # Examples
///
/// ```
/// use u_swarmevo::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_ant_count(20)
///     .with_alpha(1.0)
///     .with_beta(2.0)
///     .with_seed(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Number of ants constructed per generation.
    pub ant_count: usize,

    /// Number of generations to run.
    pub generations: usize,

    /// Pheromone exponent in the transition weight.
    pub alpha: f64,

    /// Heuristic (inverse distance) exponent in the transition weight.
    pub beta: f64,

    /// Value every pheromone entry starts at.
    pub initial_pheromone: f64,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Log every generation's best tour cost at `info` level.
    pub verbose: bool,

    /// Keep a copy of every generation's tours in the result.
    ///
    /// Off by default; the copies grow with `generations × ant_count`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub keep_history: bool,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            ant_count: 10,
            generations: 500,
            alpha: 1.0,
            beta: 1.0,
            initial_pheromone: 1e-6,
            seed: None,
            verbose: false,
            keep_history: false,
        }
    }
}

impl AcoConfig {
    pub fn with_ant_count(mut self, n: usize) -> Self {
        self.ant_count = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the pheromone exponent (clamped to ≥ 0).
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.max(0.0);
        self
    }

    /// Sets the heuristic exponent (clamped to ≥ 0).
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta.max(0.0);
        self
    }

    pub fn with_initial_pheromone(mut self, value: f64) -> Self {
        self.initial_pheromone = value;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Records every generation's tours in the result.
    pub fn with_history(mut self, keep: bool) -> Self {
        self.keep_history = keep;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.ant_count == 0 {
            return Err(OptimError::InvalidConfig(
                "ant_count must be at least 1".into(),
            ));
        }
        if self.generations == 0 {
            return Err(OptimError::InvalidConfig(
                "generations must be at least 1".into(),
            ));
        }
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(OptimError::InvalidConfig(
                "alpha must be finite and non-negative".into(),
            ));
        }
        if !(self.beta.is_finite() && self.beta >= 0.0) {
            return Err(OptimError::InvalidConfig(
                "beta must be finite and non-negative".into(),
            ));
        }
        if !(self.initial_pheromone.is_finite() && self.initial_pheromone > 0.0) {
            return Err(OptimError::InvalidConfig(
                "initial_pheromone must be finite and positive".into(),
            ));
        }
        Ok(())
    }
}
