//! Genetic Algorithm framework.
//!
//! A generic GA built on pluggable operators. Users define their encoding
//! by implementing [`GaProblem`] (initial population and fitness) and pick
//! one [`Selection`], one [`Crossover`], and one [`Mutation`] per run.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, generations,
//!   mutation rate, direction, seed)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best individual and per-generation fitness history
//! - [`GridSearch`]: Hyperparameter sweep over repeated runs
//!
//! # Operators
//!
//! | Kind | Operators |
//! |------|-----------|
//! | Selection | [`TournamentSelection`], [`RouletteSelection`] |
//! | Crossover | [`OnePointCrossover`], [`OrderCrossover`], [`BlendCrossover`] |
//! | Mutation | [`BinaryFlipMutation`], [`SwapMutation`], [`IntervalMutation`], [`AmplificationMutation`] |
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Eshelman & Schaffer (1993), "Real-Coded Genetic Algorithms and
//!   Interval-Schemata" (BLX-α)

mod config;
mod crossover;
mod mutation;
mod runner;
mod selection;
mod sweep;
mod types;

pub use config::GaConfig;
pub use crossover::{BlendCrossover, Crossover, OnePointCrossover, OrderCrossover};
pub use mutation::{
    AmplificationMutation, BinaryFlipMutation, IntervalMutation, Mutation, SwapMutation,
};
pub use runner::{GaResult, GaRunner};
pub use selection::{RouletteSelection, Selection, TournamentSelection};
pub use sweep::{GridSearch, SweepOutcome, SweepPoint};
pub use types::{GaProblem, Individual, Population};
