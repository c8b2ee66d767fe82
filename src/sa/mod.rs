//! Simulated annealing over layouts.
//!
//! A single-solution trajectory search. Each temperature level evaluates a
//! fixed number of neighbors built by random transpositions; worsening
//! moves are accepted with probability `exp(-delta / T)`, and `T` decays
//! geometrically until it reaches the termination threshold.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"

mod config;
mod neighbor;
mod random;
mod runner;
mod state;
mod types;

pub use config::AnnealConfig;
pub use neighbor::propose;
pub use random::{create_rng, RandomSource};
pub use runner::{AnnealResult, AnnealRunner};
pub use state::{metropolis_accept, SearchState, StepOutcome};
pub use types::LayoutProblem;
