//! Particle state and swarm dynamics.
//!
//! One step of the canonical PSO update, per particle and dimension:
//!
//! ```text
//! v ← w·v + c1·r1·(pbest − x) + c2·r2·(gbest − x),   r1, r2 ~ U[0, 1)
//! v ← clamp(v, vmin, vmax)
//! x ← clamp(x + v, pmin, pmax)
//! ```
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Shi & Eberhart (1998), "A Modified Particle Swarm Optimizer" (inertia)

use super::config::{check_bounds, PsoConfig};
use super::types::Position;
use crate::direction::Direction;
use crate::error::{OptimError, Result};
use rand::{Rng, RngCore};

/// One particle: its location, motion, and memory.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Particle {
    pub position: Position,
    pub velocity: Vec<f64>,
    /// Best position this particle has been evaluated at.
    pub best_position: Position,
    /// Fitness at `best_position`.
    pub best_fitness: f64,
}

/// The swarm owned by a single PSO run.
#[derive(Debug, Clone, PartialEq)]
pub struct Swarm {
    particles: Vec<Particle>,
    dimensions: usize,
}

impl Swarm {
    /// Creates a swarm at rest (zero velocity) from initial positions.
    ///
    /// Personal bests start at the initial positions with the worst
    /// possible fitness for `direction`, so the first evaluation always
    /// replaces them.
    pub fn new(positions: Vec<Position>, dimensions: usize, direction: Direction) -> Result<Self> {
        if let Some(p) = positions.iter().find(|p| p.len() != dimensions) {
            return Err(OptimError::shape("particle position", dimensions, p.len()));
        }
        let particles = positions
            .into_iter()
            .map(|position| Particle {
                velocity: vec![0.0; dimensions],
                best_position: position.clone(),
                best_fitness: direction.worst(),
                position,
            })
            .collect();
        Ok(Self {
            particles,
            dimensions,
        })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Snapshot of current positions, in particle order.
    pub fn positions(&self) -> Vec<Position> {
        self.particles.iter().map(|p| p.position.clone()).collect()
    }

    /// Records the evaluated positions as personal bests where they beat
    /// each particle's stored best.
    pub fn update_personal_bests(&mut self, fitness: &[f64], direction: Direction) -> Result<()> {
        if fitness.len() != self.particles.len() {
            return Err(OptimError::shape(
                "fitness vector",
                self.particles.len(),
                fitness.len(),
            ));
        }
        for (particle, &f) in self.particles.iter_mut().zip(fitness) {
            if direction.is_better(f, particle.best_fitness) {
                particle.best_fitness = f;
                particle.best_position.clone_from(&particle.position);
            }
        }
        Ok(())
    }

    /// Moves every particle one step toward its own best and `swarm_best`.
    ///
    /// The config's bounds are checked here since it may not have gone
    /// through [`PsoConfig::validate`].
    pub fn step(
        &mut self,
        swarm_best: &[f64],
        config: &PsoConfig,
        rng: &mut dyn RngCore,
    ) -> Result<()> {
        if swarm_best.len() != self.dimensions {
            return Err(OptimError::shape(
                "swarm best position",
                self.dimensions,
                swarm_best.len(),
            ));
        }
        check_bounds("velocity_bounds", config.velocity_bounds)?;
        check_bounds("position_bounds", config.position_bounds)?;
        let (vmin, vmax) = config.velocity_bounds;
        let (pmin, pmax) = config.position_bounds;

        for particle in &mut self.particles {
            for d in 0..self.dimensions {
                let x = particle.position[d];
                let r1: f64 = rng.random();
                let r2: f64 = rng.random();
                let v = config.inertia * particle.velocity[d]
                    + config.cognitive * r1 * (particle.best_position[d] - x)
                    + config.social * r2 * (swarm_best[d] - x);
                let v = v.clamp(vmin, vmax);
                particle.velocity[d] = v;
                particle.position[d] = (x + v).clamp(pmin, pmax);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    #[test]
    fn test_new_swarm_at_rest() {
        let swarm = Swarm::new(vec![vec![1.0, 2.0], vec![3.0, 4.0]], 2, Direction::Minimize)
            .unwrap();
        assert_eq!(swarm.len(), 2);
        for p in swarm.particles() {
            assert_eq!(p.velocity, vec![0.0, 0.0]);
            assert_eq!(p.best_position, p.position);
            assert_eq!(p.best_fitness, f64::INFINITY);
        }
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let err = Swarm::new(vec![vec![1.0, 2.0], vec![3.0]], 2, Direction::Minimize).unwrap_err();
        assert_eq!(err, OptimError::shape("particle position", 2, 1));
    }

    #[test]
    fn test_personal_best_guard_per_particle() {
        let mut swarm =
            Swarm::new(vec![vec![0.0], vec![5.0]], 1, Direction::Minimize).unwrap();
        swarm.update_personal_bests(&[3.0, 4.0], Direction::Minimize).unwrap();

        // Move both particles, then evaluate: only the first improves.
        swarm.particles[0].position = vec![1.0];
        swarm.particles[1].position = vec![6.0];
        swarm.update_personal_bests(&[2.0, 9.0], Direction::Minimize).unwrap();

        assert_eq!(swarm.particles()[0].best_position, vec![1.0]);
        assert_eq!(swarm.particles()[0].best_fitness, 2.0);
        assert_eq!(swarm.particles()[1].best_position, vec![5.0]);
        assert_eq!(swarm.particles()[1].best_fitness, 4.0);
    }

    #[test]
    fn test_personal_best_respects_maximize() {
        let mut swarm = Swarm::new(vec![vec![0.0]], 1, Direction::Maximize).unwrap();
        swarm.update_personal_bests(&[1.0], Direction::Maximize).unwrap();
        swarm.particles[0].position = vec![2.0];
        swarm.update_personal_bests(&[0.5], Direction::Maximize).unwrap();
        assert_eq!(swarm.particles()[0].best_position, vec![0.0]);
        assert_eq!(swarm.particles()[0].best_fitness, 1.0);
    }

    #[test]
    fn test_step_moves_toward_swarm_best() {
        let config = PsoConfig::default()
            .with_weights(0.0, 0.0, 1.0)
            .with_velocity_bounds(-100.0, 100.0);
        let mut swarm = Swarm::new(vec![vec![-4.0]], 1, Direction::Minimize).unwrap();
        let mut rng = create_rng(42);
        swarm.step(&[4.0], &config, &mut rng).unwrap();
        let x = swarm.particles()[0].position[0];
        assert!((-4.0..=4.0).contains(&x), "moved to {x}");
    }

    #[test]
    fn test_step_rejects_wrong_swarm_best() {
        let mut swarm = Swarm::new(vec![vec![0.0, 0.0]], 2, Direction::Minimize).unwrap();
        let mut rng = create_rng(0);
        assert!(swarm
            .step(&[1.0], &PsoConfig::default(), &mut rng)
            .is_err());
    }

    #[test]
    fn test_step_rejects_unchecked_bounds() {
        let mut swarm = Swarm::new(vec![vec![0.0]], 1, Direction::Minimize).unwrap();
        let mut rng = create_rng(0);

        let reversed = PsoConfig {
            velocity_bounds: (1.0, -1.0),
            ..PsoConfig::default()
        };
        let err = swarm.step(&[1.0], &reversed, &mut rng).unwrap_err();
        assert!(matches!(err, OptimError::InvalidConfig(_)));

        let nan = PsoConfig {
            position_bounds: (f64::NAN, 10.0),
            ..PsoConfig::default()
        };
        let err = swarm.step(&[1.0], &nan, &mut rng).unwrap_err();
        assert!(matches!(err, OptimError::InvalidConfig(_)));

        // Rejected steps leave the particle where it was.
        assert_eq!(swarm.particles()[0].position, vec![0.0]);
        assert_eq!(swarm.particles()[0].velocity, vec![0.0]);
    }

    proptest! {
        #[test]
        fn prop_velocity_and_position_stay_in_bounds(
            start in prop::collection::vec(prop::collection::vec(-10.0f64..10.0, 3), 1..10),
            target in prop::collection::vec(-50.0f64..50.0, 3),
            inertia in -2.0f64..2.0,
            cognitive in 0.0f64..4.0,
            social in 0.0f64..4.0,
            steps in 1usize..20,
            seed in any::<u64>(),
        ) {
            let config = PsoConfig::default()
                .with_dimensions(3)
                .with_weights(inertia, cognitive, social)
                .with_velocity_bounds(-0.5, 0.75)
                .with_position_bounds(-10.0, 10.0);
            let mut swarm = Swarm::new(start, 3, Direction::Minimize).unwrap();
            let mut rng = create_rng(seed);
            for _ in 0..steps {
                swarm.step(&target, &config, &mut rng).unwrap();
                for p in swarm.particles() {
                    for &v in &p.velocity {
                        prop_assert!((-0.5..=0.75).contains(&v));
                    }
                    for &x in &p.position {
                        prop_assert!((-10.0..=10.0).contains(&x));
                    }
                }
            }
        }
    }
}
