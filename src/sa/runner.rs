//! Annealing execution loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use super::config::AnnealConfig;
use super::neighbor::propose;
use super::random::{create_rng, RandomSource};
use super::state::SearchState;
use super::types::LayoutProblem;
use crate::error::ConfigError;
use crate::layout::{Alphabet, Layout};

/// Result of an annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealResult {
    /// The best layout found.
    pub best: Layout,

    /// Cost of the best layout.
    pub best_cost: f64,

    /// Cost of the starting layout.
    pub initial_cost: f64,

    /// Current cost at the end of each outer iteration.
    pub trajectory: Vec<f64>,

    /// Best cost at the end of each outer iteration.
    pub best_trajectory: Vec<f64>,

    /// Outer iterations (temperature levels) completed.
    pub outer_iterations: usize,

    /// Total proposals evaluated.
    pub evaluations: usize,

    /// Accepted proposals, including improvements.
    pub accepted_moves: usize,

    /// Strictly improving proposals.
    pub improving_moves: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Whether the run was cancelled between outer iterations.
    pub cancelled: bool,
}

/// Executes the layout annealer.
pub struct AnnealRunner;

impl AnnealRunner {
    /// Anneals from the identity layout over `alphabet`.
    pub fn run<P: LayoutProblem>(
        problem: &P,
        alphabet: &Alphabet,
        config: &AnnealConfig,
    ) -> Result<AnnealResult, ConfigError> {
        Self::run_from(problem, &Layout::identity(alphabet), config)
    }

    /// Anneals from a caller-supplied starting layout.
    pub fn run_from<P: LayoutProblem>(
        problem: &P,
        initial: &Layout,
        config: &AnnealConfig,
    ) -> Result<AnnealResult, ConfigError> {
        Self::run_with_cancel(problem, initial, config, None)
    }

    /// Anneals with an optional cancellation flag, polled once per outer
    /// iteration.
    pub fn run_with_cancel<P: LayoutProblem>(
        problem: &P,
        initial: &Layout,
        config: &AnnealConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealResult, ConfigError> {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::run_with_source(problem, initial, config, &mut rng, cancel)
    }

    /// Anneals drawing all randomness from `rng`.
    ///
    /// `config.seed` is ignored; the caller owns the source.
    pub fn run_with_source<P, G>(
        problem: &P,
        initial: &Layout,
        config: &AnnealConfig,
        rng: &mut G,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AnnealResult, ConfigError>
    where
        P: LayoutProblem,
        G: RandomSource + ?Sized,
    {
        config.validate()?;
        initial.validate()?;
        if initial.len() < 2 {
            return Err(ConfigError::AlphabetTooSmall(initial.len()));
        }
        let alphabet = initial.alphabet();
        if let Some(symbol) = problem
            .required_symbols()
            .into_iter()
            .find(|&s| !alphabet.contains(s))
        {
            return Err(ConfigError::AlphabetMismatch(symbol));
        }

        // Initialize
        let initial_cost = problem.cost(initial);
        let mut state = SearchState::new(initial.clone(), initial_cost, config.initial_temperature);
        let mut cancelled = false;

        info!(
            symbols = initial.len(),
            initial_cost,
            temperature = config.initial_temperature,
            cooling_rate = config.cooling_rate,
            levels = config.outer_iterations(),
            "annealing started"
        );

        while state.temperature > config.termination_threshold {
            // Cancellation is observed only between levels
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            state.begin_outer();
            let accepted_before = state.accepted_moves;

            for _ in 0..config.max_iter_per_temperature {
                let candidate = propose(&state.current, config.max_swaps_per_proposal, rng);
                let candidate_cost = problem.cost(&candidate);
                // Metropolis acceptance criterion, then elitist best update
                state.consider(candidate, candidate_cost, rng);
            }

            debug!(
                iteration = state.outer_iteration,
                temperature = state.temperature,
                current_cost = state.current_cost,
                best_cost = state.best_cost,
                accepted = state.accepted_moves - accepted_before,
                "temperature level done"
            );

            // Record history and cool down
            state.end_outer(config.cooling_rate);
        }

        info!(
            best_cost = state.best_cost,
            levels = state.outer_iteration,
            evaluations = state.evaluations,
            acceptance = state.acceptance_ratio(),
            cancelled,
            "annealing finished"
        );

        Ok(AnnealResult {
            best: state.best,
            best_cost: state.best_cost,
            initial_cost,
            trajectory: state.trajectory,
            best_trajectory: state.best_trajectory,
            outer_iterations: state.outer_iteration,
            evaluations: state.evaluations,
            accepted_moves: state.accepted_moves,
            improving_moves: state.improving_moves,
            final_temperature: state.temperature,
            cancelled,
        })
    }
}
