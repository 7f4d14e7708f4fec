//! Particle Swarm Optimization over real vectors.
//!
//! Particles move through a bounded box, pulled toward their own best
//! position and toward the best position the swarm evaluated in the current
//! generation.
//!
//! # Key Types
//!
//! - [`PsoConfig`]: Swarm size, bounds, weights, direction
//! - [`PsoProblem`]: Problem definition
//! - [`PsoRunner`]: Executes the swarm loop
//! - [`Swarm`] / [`Particle`]: Swarm state and dynamics

mod config;
mod runner;
mod swarm;
mod types;

pub use config::PsoConfig;
pub use runner::{PsoResult, PsoRunner};
pub use swarm::{Particle, Swarm};
pub use types::{Position, PsoProblem};
