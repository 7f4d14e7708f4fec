//! PSO configuration.

use crate::direction::Direction;
use crate::error::{OptimError, Result};

/// Configuration for Particle Swarm Optimization.
///
/// # Examples
///
/// ```
/// use u_swarmevo::pso::PsoConfig;
///
/// let config = PsoConfig::default()
///     .with_dimensions(3)
///     .with_position_bounds(-5.0, 5.0)
///     .with_velocity_bounds(-0.5, 0.5)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Number of particles in the swarm.
    pub particle_count: usize,

    /// Dimensionality of every position.
    pub dimensions: usize,

    /// Number of generations to run.
    pub generations: usize,

    /// `(vmin, vmax)` per-component velocity clamp.
    pub velocity_bounds: (f64, f64),

    /// `(pmin, pmax)` per-component position clamp, also the default
    /// initialization range.
    pub position_bounds: (f64, f64),

    /// Inertia weight `w`.
    pub inertia: f64,

    /// Cognitive (personal-best) weight `c1`.
    pub cognitive: f64,

    /// Social (swarm-best) weight `c2`.
    pub social: f64,

    /// Whether lower or higher fitness is better.
    pub direction: Direction,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Log every generation's best fitness at `info` level.
    pub verbose: bool,

    /// Keep a copy of every generation's evaluated positions in the result.
    ///
    /// Off by default; the copies grow with `generations × particle_count`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub keep_history: bool,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            particle_count: 30,
            dimensions: 1,
            generations: 500,
            velocity_bounds: (-1.0, 1.0),
            position_bounds: (-10.0, 10.0),
            inertia: 0.7,
            cognitive: 1.5,
            social: 1.5,
            direction: Direction::Minimize,
            seed: None,
            verbose: false,
            keep_history: false,
        }
    }
}

impl PsoConfig {
    pub fn with_particle_count(mut self, n: usize) -> Self {
        self.particle_count = n;
        self
    }

    pub fn with_dimensions(mut self, n: usize) -> Self {
        self.dimensions = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the velocity clamp. Bounds given in reverse are swapped.
    pub fn with_velocity_bounds(mut self, lo: f64, hi: f64) -> Self {
        self.velocity_bounds = (lo.min(hi), lo.max(hi));
        self
    }

    /// Sets the position clamp. Bounds given in reverse are swapped.
    pub fn with_position_bounds(mut self, lo: f64, hi: f64) -> Self {
        self.position_bounds = (lo.min(hi), lo.max(hi));
        self
    }

    /// Sets inertia, cognitive, and social weights at once.
    pub fn with_weights(mut self, inertia: f64, cognitive: f64, social: f64) -> Self {
        self.inertia = inertia;
        self.cognitive = cognitive;
        self.social = social;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
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

    /// Records every generation's evaluated positions in the result.
    pub fn with_history(mut self, keep: bool) -> Self {
        self.keep_history = keep;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.particle_count == 0 {
            return Err(OptimError::InvalidConfig(
                "particle_count must be at least 1".into(),
            ));
        }
        if self.dimensions == 0 {
            return Err(OptimError::InvalidConfig(
                "dimensions must be at least 1".into(),
            ));
        }
        if self.generations == 0 {
            return Err(OptimError::InvalidConfig(
                "generations must be at least 1".into(),
            ));
        }
        check_bounds("velocity_bounds", self.velocity_bounds)?;
        check_bounds("position_bounds", self.position_bounds)?;
        for (name, w) in [
            ("inertia", self.inertia),
            ("cognitive", self.cognitive),
            ("social", self.social),
        ] {
            if !w.is_finite() {
                return Err(OptimError::InvalidConfig(format!(
                    "{name} weight must be finite, got {w}"
                )));
            }
        }
        Ok(())
    }
}

pub(crate) fn check_bounds(name: &str, (lo, hi): (f64, f64)) -> Result<()> {
    if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
        return Err(OptimError::InvalidConfig(format!(
            "{name} must be finite with lo <= hi, got ({lo}, {hi})"
        )));
    }
    Ok(())
}
