//! Ant Colony Optimization for closed-tour problems.
//!
//! Each generation every ant builds a tour guided by pheromone and inverse
//! distance, the tours are scored, and a [`PheromoneUpdate`] policy
//! evaporates and reinforces the pheromone matrix. ACO always minimizes.
//!
//! # Key Types
//!
//! - [`AcoConfig`]: Colony size, generations, exponents, initial pheromone
//! - [`AcoProblem`] / [`DistanceMatrix`]: Problem definition
//! - [`AcoRunner`]: Executes the colony loop
//! - [`StandardUpdate`], [`ElitistUpdate`], [`RankUpdate`]: Update policies

mod config;
mod construction;
mod pheromone;
mod runner;
mod types;

pub use config::AcoConfig;
pub use construction::AntConstructor;
pub use pheromone::{ElitistUpdate, PheromoneMatrix, PheromoneUpdate, RankUpdate, StandardUpdate};
pub use runner::{AcoResult, AcoRunner};
pub use types::{AcoProblem, DistanceMatrix, Tour};
