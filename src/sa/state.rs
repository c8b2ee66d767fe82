//! Search state and single-step transitions.
//!
//! The runner drives a [`SearchState`] through its transitions; each one
//! is a plain method so that it can be exercised on its own.

use super::random::RandomSource;
use crate::layout::Layout;

/// Metropolis acceptance rule.
///
/// Strict improvements are always accepted without consuming a draw.
/// Otherwise one uniform draw `u` is taken and the move is accepted when
/// `u < exp(-delta / temperature)`; at `delta == 0` that probability is 1.
pub fn metropolis_accept<G>(delta: f64, temperature: f64, rng: &mut G) -> bool
where
    G: RandomSource + ?Sized,
{
    if delta < 0.0 {
        return true;
    }
    rng.next_unit() < (-delta / temperature).exp()
}

/// What happened to one proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Rejected by the Metropolis rule; the state is unchanged.
    Rejected,
    /// Accepted without beating the best cost.
    Accepted,
    /// Accepted and recorded as the new best.
    NewBest,
}

impl StepOutcome {
    pub fn is_accepted(self) -> bool {
        !matches!(self, StepOutcome::Rejected)
    }
}

/// Everything the annealer carries between iterations.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub current: Layout,
    pub current_cost: f64,
    pub best: Layout,
    pub best_cost: f64,
    pub temperature: f64,
    /// Outer iterations started so far.
    pub outer_iteration: usize,
    /// Current cost at the end of each outer iteration.
    pub trajectory: Vec<f64>,
    /// Best cost at the end of each outer iteration.
    pub best_trajectory: Vec<f64>,
    pub evaluations: usize,
    pub accepted_moves: usize,
    pub improving_moves: usize,
}

impl SearchState {
    /// Initial state: `layout` is both current and best.
    pub fn new(layout: Layout, cost: f64, temperature: f64) -> Self {
        Self {
            best: layout.clone(),
            current: layout,
            current_cost: cost,
            best_cost: cost,
            temperature,
            outer_iteration: 0,
            trajectory: Vec::new(),
            best_trajectory: Vec::new(),
            evaluations: 0,
            accepted_moves: 0,
            improving_moves: 0,
        }
    }

    /// Starts an outer iteration at the current temperature.
    pub fn begin_outer(&mut self) {
        self.outer_iteration += 1;
    }

    /// Offers an evaluated candidate to the state.
    pub fn consider<G>(&mut self, candidate: Layout, candidate_cost: f64, rng: &mut G) -> StepOutcome
    where
        G: RandomSource + ?Sized,
    {
        self.evaluations += 1;
        let delta = candidate_cost - self.current_cost;
        if delta < 0.0 {
            self.improving_moves += 1;
        }
        if !metropolis_accept(delta, self.temperature, rng) {
            return StepOutcome::Rejected;
        }

        self.accepted_moves += 1;
        self.current = candidate;
        self.current_cost = candidate_cost;

        if candidate_cost < self.best_cost {
            self.best = self.current.clone();
            self.best_cost = candidate_cost;
            StepOutcome::NewBest
        } else {
            StepOutcome::Accepted
        }
    }

    /// Closes an outer iteration: records costs, then cools.
    pub fn end_outer(&mut self, cooling_rate: f64) {
        self.trajectory.push(self.current_cost);
        self.best_trajectory.push(self.best_cost);
        self.temperature *= cooling_rate;
    }

    /// Acceptance ratio over all proposals so far.
    pub fn acceptance_ratio(&self) -> f64 {
        if self.evaluations == 0 {
            0.0
        } else {
            self.accepted_moves as f64 / self.evaluations as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Alphabet;
    use crate::sa::random::{create_rng, ScriptedSource};

    fn abc() -> Layout {
        Layout::identity(&Alphabet::new("abc".chars()).unwrap())
    }

    fn bac() -> Layout {
        Layout::from_images(&Alphabet::new("abc".chars()).unwrap(), "bac").unwrap()
    }

    #[test]
    fn test_improvement_skips_draw() {
        let mut rng = ScriptedSource::new();
        assert!(metropolis_accept(-1.0, 10.0, &mut rng));
        assert_eq!(rng.unit_draws, 0);
    }

    #[test]
    fn test_zero_delta_always_accepted() {
        let mut rng = ScriptedSource::new().with_units([0.0, 0.5, 0.999_999_999]);
        for _ in 0..3 {
            assert!(metropolis_accept(0.0, 1e-9, &mut rng));
        }
        assert_eq!(rng.unit_draws, 3);
    }

    #[test]
    fn test_worse_move_uses_metropolis_probability() {
        // exp(-1) ~ 0.3679
        let mut rng = ScriptedSource::new().with_units([0.36, 0.37]);
        assert!(metropolis_accept(1.0, 1.0, &mut rng));
        assert!(!metropolis_accept(1.0, 1.0, &mut rng));
    }

    #[test]
    fn test_consider_accept_and_best() {
        let mut state = SearchState::new(abc(), 10.0, 1.0);
        let mut rng = ScriptedSource::new();

        let outcome = state.consider(bac(), 4.0, &mut rng);
        assert_eq!(outcome, StepOutcome::NewBest);
        assert_eq!(state.current, bac());
        assert_eq!(state.best_cost, 4.0);
        assert_eq!(state.improving_moves, 1);
    }

    #[test]
    fn test_consider_worse_accepted_keeps_best() {
        let mut state = SearchState::new(abc(), 1.0, 1.0);
        let mut rng = ScriptedSource::new().with_units([0.0]);

        let outcome = state.consider(bac(), 2.0, &mut rng);
        assert_eq!(outcome, StepOutcome::Accepted);
        assert_eq!(state.current_cost, 2.0);
        assert_eq!(state.best, abc());
        assert_eq!(state.best_cost, 1.0);
    }

    #[test]
    fn test_consider_rejected_leaves_state() {
        let mut state = SearchState::new(abc(), 1.0, 1.0);
        let mut rng = ScriptedSource::new().with_units([0.99]);

        let outcome = state.consider(bac(), 5.0, &mut rng);
        assert_eq!(outcome, StepOutcome::Rejected);
        assert!(!outcome.is_accepted());
        assert_eq!(state.current, abc());
        assert_eq!(state.current_cost, 1.0);
        assert_eq!(state.evaluations, 1);
        assert_eq!(state.accepted_moves, 0);
    }

    #[test]
    fn test_equal_cost_is_not_new_best() {
        let mut state = SearchState::new(abc(), 3.0, 1.0);
        let mut rng = ScriptedSource::new().with_units([0.5]);
        assert_eq!(state.consider(bac(), 3.0, &mut rng), StepOutcome::Accepted);
        assert_eq!(state.best, abc());
    }

    #[test]
    fn test_end_outer_records_and_cools() {
        let mut state = SearchState::new(abc(), 3.0, 100.0);
        state.begin_outer();
        state.end_outer(0.5);
        assert_eq!(state.outer_iteration, 1);
        assert_eq!(state.trajectory, vec![3.0]);
        assert_eq!(state.best_trajectory, vec![3.0]);
        assert!((state.temperature - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_best_cost_monotone_over_random_steps() {
        let mut state = SearchState::new(abc(), 5.0, 2.0);
        let mut rng = create_rng(42);
        let costs = [4.0, 6.0, 3.5, 7.0, 3.5, 2.0, 9.0, 1.0, 8.0];
        let mut previous_best = state.best_cost;
        for (i, &cost) in costs.iter().cycle().take(200).enumerate() {
            let candidate = if i % 2 == 0 { bac() } else { abc() };
            if state.consider(candidate, cost, &mut rng).is_accepted() {
                assert!(state.best_cost <= previous_best);
                previous_best = state.best_cost;
            }
        }
        assert!(state.best_cost <= 5.0);
        assert!(state.best_cost <= state.current_cost);
    }
}
