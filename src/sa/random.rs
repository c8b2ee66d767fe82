//! Randomness used by the annealer.
//!
//! The engine draws through [`RandomSource`] rather than a concrete RNG,
//! so tests can replay an exact sequence of draws. Every [`rand::Rng`]
//! is a `RandomSource`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The draws the annealer needs.
pub trait RandomSource {
    /// Uniform real in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `[low, high]`, both inclusive.
    fn int_inclusive(&mut self, low: usize, high: usize) -> usize;

    /// `amount` distinct indices drawn from `0..length` without replacement.
    fn sample_distinct(&mut self, length: usize, amount: usize) -> Vec<usize>;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn int_inclusive(&mut self, low: usize, high: usize) -> usize {
        self.random_range(low..=high)
    }

    fn sample_distinct(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(self, length, amount).into_vec()
    }
}

/// Creates a seeded RNG.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[cfg(test)]
pub(crate) use scripted::ScriptedSource;

#[cfg(test)]
mod scripted {
    use std::collections::VecDeque;

    use super::RandomSource;

    /// Replays queued draws in order; panics when a queue runs dry.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedSource {
        units: VecDeque<f64>,
        ints: VecDeque<usize>,
        samples: VecDeque<Vec<usize>>,
        pub(crate) unit_draws: usize,
    }

    impl ScriptedSource {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_units<I: IntoIterator<Item = f64>>(mut self, units: I) -> Self {
            self.units.extend(units);
            self
        }

        pub(crate) fn with_ints<I: IntoIterator<Item = usize>>(mut self, ints: I) -> Self {
            self.ints.extend(ints);
            self
        }

        pub(crate) fn with_samples<I: IntoIterator<Item = Vec<usize>>>(mut self, samples: I) -> Self {
            self.samples.extend(samples);
            self
        }
    }

    impl RandomSource for ScriptedSource {
        fn next_unit(&mut self) -> f64 {
            self.unit_draws += 1;
            self.units.pop_front().expect("scripted unit draws exhausted")
        }

        fn int_inclusive(&mut self, low: usize, high: usize) -> usize {
            let value = self.ints.pop_front().expect("scripted int draws exhausted");
            assert!((low..=high).contains(&value), "scripted int {value} outside [{low}, {high}]");
            value
        }

        fn sample_distinct(&mut self, length: usize, amount: usize) -> Vec<usize> {
            let sample = self.samples.pop_front().expect("scripted samples exhausted");
            assert_eq!(sample.len(), amount);
            assert!(sample.iter().all(|&i| i < length));
            sample
        }
    }
}
