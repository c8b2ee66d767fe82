//! Core trait for layout annealing.

use std::collections::BTreeSet;

use crate::layout::Layout;

/// A cost function over layouts.
///
/// The annealer owns neighbor generation (random transpositions),
/// temperature management, and acceptance; the problem only scores
/// candidates. Lower is better.
///
/// # Examples
///
/// ```
/// use u_keylayout::layout::Layout;
/// use u_keylayout::sa::LayoutProblem;
///
/// /// Counts keys that are not mapped to themselves.
/// struct Displacement;
///
/// impl LayoutProblem for Displacement {
///     fn cost(&self, layout: &Layout) -> f64 {
///         layout.iter().filter(|(k, v)| k != v).count() as f64
///     }
/// }
/// ```
pub trait LayoutProblem: Send + Sync {
    /// Computes the cost of a layout. Must be deterministic.
    fn cost(&self, layout: &Layout) -> f64;

    /// Symbols a layout must map for [`cost`](Self::cost) to be meaningful.
    ///
    /// The runner rejects a starting layout that misses any of them.
    fn required_symbols(&self) -> BTreeSet<char> {
        BTreeSet::new()
    }
}
