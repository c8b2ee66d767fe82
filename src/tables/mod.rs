//! Input tables consumed by the objective.
//!
//! - [`PairCounts`] / [`PairFrequency`]: how often each ordered symbol
//!   pair occurs in text, raw and normalized.
//! - [`PairCost`]: what each ordered pair of key positions costs to type.
//! - [`corpus`]: builds [`PairCounts`] from a word-frequency listing.

pub mod corpus;
mod cost;
mod frequency;
mod pair;

pub use cost::PairCost;
pub use frequency::{PairCounts, PairFrequency};
pub use pair::Pair;

use std::path::Path;

use crate::error::TableError;

fn read_source(path: &Path) -> Result<String, TableError> {
    std::fs::read_to_string(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}
