//! Keyboard layout optimization by simulated annealing.
//!
//! A layout is a permutation of a fixed alphabet. Its cost is the
//! frequency-weighted sum of per-pair typing costs after mapping every
//! source pair through the permutation. The crate searches for a cheap
//! layout with geometric-cooling simulated annealing.
//!
//! - **Tables** ([`tables`]): pair counts from a corpus, normalized pair
//!   frequencies, and the pair-cost lookup.
//! - **Layouts** ([`layout`]): validated permutations and QWERTY rendering.
//! - **Objective** ([`objective`]): the weighted-equivalence cost.
//! - **Annealing** ([`sa`]): neighbor proposals, Metropolis acceptance,
//!   and the search loop.
//! - **Reporting** ([`report`]): per-iteration trajectory export.
//!
//! # Example
//!
//! ```
//! use u_keylayout::layout::{Alphabet, Layout};
//! use u_keylayout::objective::WeightedEquivalence;
//! use u_keylayout::sa::AnnealConfig;
//! use u_keylayout::tables::{Pair, PairCost, PairFrequency};
//!
//! let frequency = PairFrequency::from_weights([
//!     (Pair::new('t', 'h'), 0.6),
//!     (Pair::new('h', 'e'), 0.4),
//! ]);
//! let cost: PairCost = [(Pair::new('t', 'h'), 2.0), (Pair::new('h', 'e'), 3.0)]
//!     .into_iter()
//!     .collect();
//!
//! let problem = WeightedEquivalence::new(&frequency, &cost);
//! let config = AnnealConfig::default()
//!     .with_initial_temperature(10.0)
//!     .with_termination_threshold(0.01)
//!     .with_max_iter_per_temperature(20)
//!     .with_seed(42);
//!
//! let start = Layout::identity(&Alphabet::latin());
//! let (result, _) = problem.anneal(&start, &config).unwrap();
//! assert!(result.best_cost <= result.initial_cost);
//! ```

pub mod error;
pub mod layout;
pub mod objective;
pub mod report;
pub mod sa;
pub mod tables;
