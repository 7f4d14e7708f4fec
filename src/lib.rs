//! Population-based stochastic optimization.
//!
//! Three families share one vocabulary (population, fitness vector,
//! [`Direction`], fixed generation budget):
//!
//! - **Genetic Algorithm (GA)**: Evolutionary optimization with pluggable
//!   selection, crossover, and mutation operators, plus a hyperparameter
//!   grid search.
//! - **Ant Colony Optimization (ACO)**: Probabilistic tour construction
//!   guided by a pheromone matrix, with pluggable pheromone update
//!   policies.
//! - **Particle Swarm Optimization (PSO)**: Velocity-driven search over
//!   bounded real vectors.
//!
//! Every run executes exactly the configured number of generations; there
//! is no early stopping. Runs are reproducible when a seed is configured.
//!
//! # Errors
//!
//! All fallible operations return [`Result`] with an [`OptimError`]. Any
//! error aborts the run in progress.
//!
//! # Logging
//!
//! Runners emit [`tracing`] events: run start and end at `info`, one event
//! per generation at `debug` (or `info` with `verbose` set in the config).

pub mod aco;
pub mod direction;
pub mod error;
pub mod ga;
pub mod pso;
pub mod random;

pub use direction::{best_index, Direction};
pub use error::{OptimError, Result};
