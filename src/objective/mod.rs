//! Weighted-equivalence objective.
//!
//! The cost of a layout is the frequency-weighted sum of pair costs after
//! mapping each source pair through the layout:
//!
//! ```text
//! cost(L) = sum over (a, b) with weight w of  w * C[(L(a), L(b))]
//! ```
//!
//! Mapped pairs missing from the cost table contribute nothing. They are
//! counted in [`Evaluation`] so that incomplete cost tables can be spotted.

use std::collections::BTreeSet;

use tracing::warn;

use crate::error::ConfigError;
use crate::layout::Layout;
use crate::sa::{AnnealConfig, AnnealResult, AnnealRunner, LayoutProblem};
use crate::tables::{Pair, PairCost, PairFrequency};

/// A cost together with what the evaluator had to skip to get it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Weighted sum over pairs that had a cost entry.
    pub cost: f64,
    /// Pairs whose mapped pair had no cost entry (or an unmapped symbol).
    pub skipped_pairs: usize,
    /// Total frequency weight of the skipped pairs.
    pub skipped_weight: f64,
}

/// Computes the weighted-equivalence cost of `layout`.
///
/// `frequency` is used as given; it is not re-normalized. Linear in the
/// number of pairs in `frequency`.
pub fn evaluate(layout: &Layout, frequency: &PairFrequency, cost: &PairCost) -> f64 {
    let mut total = 0.0;
    for (pair, weight) in frequency.iter() {
        if let Some(c) = mapped(layout, pair).and_then(|p| cost.get(&p)) {
            total += weight * c;
        }
    }
    total
}

/// Like [`evaluate`], also reporting skipped pairs.
pub fn evaluate_detailed(
    layout: &Layout,
    frequency: &PairFrequency,
    cost: &PairCost,
) -> Evaluation {
    let mut eval = Evaluation::default();
    for (pair, weight) in frequency.iter() {
        match mapped(layout, pair).and_then(|p| cost.get(&p)) {
            Some(c) => eval.cost += weight * c,
            None => {
                eval.skipped_pairs += 1;
                eval.skipped_weight += weight;
            }
        }
    }
    eval
}

#[inline]
fn mapped(layout: &Layout, pair: Pair) -> Option<Pair> {
    Some(Pair::new(layout.get(pair.first)?, layout.get(pair.second)?))
}

/// The keyboard problem: a frequency table and a cost table, borrowed
/// read-only for the whole search.
#[derive(Debug, Clone, Copy)]
pub struct WeightedEquivalence<'a> {
    frequency: &'a PairFrequency,
    cost: &'a PairCost,
}

impl<'a> WeightedEquivalence<'a> {
    pub fn new(frequency: &'a PairFrequency, cost: &'a PairCost) -> Self {
        Self { frequency, cost }
    }

    pub fn frequency(&self) -> &PairFrequency {
        self.frequency
    }

    pub fn cost_table(&self) -> &PairCost {
        self.cost
    }

    /// Detailed evaluation of `layout`.
    pub fn evaluate(&self, layout: &Layout) -> Evaluation {
        evaluate_detailed(layout, self.frequency, self.cost)
    }

    /// Anneals from `initial` and evaluates the best layout in detail.
    ///
    /// Logs a warning when the best layout still maps pairs that the cost
    /// table does not cover.
    pub fn anneal(
        &self,
        initial: &Layout,
        config: &AnnealConfig,
    ) -> Result<(AnnealResult, Evaluation), ConfigError> {
        let result = AnnealRunner::run_from(self, initial, config)?;
        let evaluation = self.evaluate(&result.best);
        if evaluation.skipped_pairs > 0 {
            warn!(
                skipped_pairs = evaluation.skipped_pairs,
                skipped_weight = evaluation.skipped_weight,
                "best layout maps pairs missing from the cost table"
            );
        }
        Ok((result, evaluation))
    }

    /// Checks that `layout` maps every symbol the frequency table uses.
    pub fn check_layout(&self, layout: &Layout) -> Result<(), ConfigError> {
        let alphabet = layout.alphabet();
        match self.frequency.symbols().into_iter().find(|&s| !alphabet.contains(s)) {
            Some(symbol) => Err(ConfigError::AlphabetMismatch(symbol)),
            None => Ok(()),
        }
    }
}

impl LayoutProblem for WeightedEquivalence<'_> {
    fn cost(&self, layout: &Layout) -> f64 {
        evaluate(layout, self.frequency, self.cost)
    }

    fn required_symbols(&self) -> BTreeSet<char> {
        self.frequency.symbols()
    }
}
