//! Neighbor proposals by random transposition.

use super::random::RandomSource;
use crate::layout::Layout;

/// Proposes a neighbor of `layout`.
///
/// Draws a swap count uniformly from `[1, max_swaps]`, then applies that
/// many transpositions to a copy, each between two distinct keys. The
/// input is left untouched. Transpositions may cancel one another, so at
/// most `2 * max_swaps` assignments change.
pub fn propose<G>(layout: &Layout, max_swaps: usize, rng: &mut G) -> Layout
where
    G: RandomSource + ?Sized,
{
    let mut candidate = layout.clone();
    let n = candidate.len();
    if n < 2 {
        return candidate;
    }

    let swaps = rng.int_inclusive(1, max_swaps.max(1));
    for _ in 0..swaps {
        let picked = rng.sample_distinct(n, 2);
        candidate.transpose(picked[0], picked[1]);
    }
    candidate
}
