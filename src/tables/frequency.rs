//! Normalized pair-frequency table.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use tracing::debug;

use super::pair::Pair;
use super::read_source;
use crate::error::TableError;

/// Raw, unnormalized pair counts, kept sorted by pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairCounts {
    counts: BTreeMap<Pair, u64>,
}

impl PairCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` occurrences of `pair`.
    ///
    /// Fails without changing the table if the pair's count would exceed
    /// `u64::MAX`.
    pub fn add(&mut self, pair: Pair, count: u64) -> Result<(), TableError> {
        let entry = self.counts.entry(pair).or_insert(0);
        *entry = entry
            .checked_add(count)
            .ok_or(TableError::CountOverflow(pair))?;
        Ok(())
    }

    /// Adds `count` occurrences of every pair in `pairs`, repeats included.
    ///
    /// All or nothing: on overflow no pair is credited.
    pub fn add_all(&mut self, pairs: &[Pair], count: u64) -> Result<(), TableError> {
        let mut increments: BTreeMap<Pair, u64> = BTreeMap::new();
        for &pair in pairs {
            let increment = increments.entry(pair).or_insert(0);
            *increment = increment
                .checked_add(count)
                .ok_or(TableError::CountOverflow(pair))?;
        }
        for (&pair, &increment) in &increments {
            self.get(&pair)
                .unwrap_or(0)
                .checked_add(increment)
                .ok_or(TableError::CountOverflow(pair))?;
        }
        for (pair, increment) in increments {
            self.add(pair, increment)?;
        }
        Ok(())
    }

    pub fn get(&self, pair: &Pair) -> Option<u64> {
        self.counts.get(pair).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts. Widened so that tables whose individual counts
    /// fit in `u64` always have a representable total.
    pub fn total(&self) -> u128 {
        self.counts.values().map(|&count| u128::from(count)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pair, u64)> + '_ {
        self.counts.iter().map(|(&pair, &count)| (pair, count))
    }

    /// Parses a `Pair\tFrequency` table: one header line, then one
    /// tab-separated `pair count` record per line. Blank lines are ignored.
    pub fn parse_tsv(text: &str) -> Result<Self, TableError> {
        let mut counts = Self::new();
        for (index, raw) in text.lines().enumerate().skip(1) {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let line_no = index + 1;
            let mut fields = line.split('\t');
            let (Some(pair_field), Some(count_field), None) =
                (fields.next(), fields.next(), fields.next())
            else {
                return Err(TableError::malformed(
                    line_no,
                    line,
                    "expected `pair<TAB>count`",
                ));
            };
            let pair = Pair::parse(pair_field.trim()).ok_or_else(|| {
                TableError::malformed(line_no, line, "pair must be exactly two symbols")
            })?;
            let count = count_field.trim().parse::<u64>().map_err(|e| {
                TableError::malformed(line_no, line, format!("invalid count: {e}"))
            })?;
            counts
                .add(pair, count)
                .map_err(|e| TableError::malformed(line_no, line, e.to_string()))?;
        }
        Ok(counts)
    }

    /// Reads a `Pair\tFrequency` table from disk.
    pub fn read_tsv(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let text = read_source(path.as_ref())?;
        Self::parse_tsv(&text)
    }

    /// Renders the counts as a `Pair\tFrequency` table, sorted by pair.
    pub fn to_tsv(&self) -> String {
        let mut out = String::from("Pair\tFrequency\n");
        for (pair, count) in self.iter() {
            out.push_str(&format!("{pair}\t{count}\n"));
        }
        out
    }
}

impl FromIterator<(Pair, u64)> for PairCounts {
    /// Collects counts, saturating at `u64::MAX` per pair. Use
    /// [`PairCounts::add`] where overflow must be reported.
    fn from_iter<I: IntoIterator<Item = (Pair, u64)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (pair, count) in iter {
            let entry = counts.counts.entry(pair).or_insert(0);
            *entry = entry.saturating_add(count);
        }
        counts
    }
}

/// Relative pair frequencies summing to 1.
///
/// Immutable once built. The objective walks [`iter`](Self::iter), so
/// evaluation cost is linear in the number of observed pairs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "PairFrequencyRecord"))]
pub struct PairFrequency {
    entries: Vec<(Pair, f64)>,
}

impl PairFrequency {
    /// Normalizes raw counts by their total.
    pub fn from_counts(counts: &PairCounts) -> Result<Self, TableError> {
        let total = counts.total();
        if total == 0 {
            return Err(TableError::Empty("pair-frequency"));
        }
        let total = total as f64;
        let entries: Vec<(Pair, f64)> = counts
            .iter()
            .filter(|&(_, count)| count > 0)
            .map(|(pair, count)| (pair, count as f64 / total))
            .collect();
        debug!(pairs = entries.len(), total, "normalized pair counts");
        Ok(Self { entries })
    }

    /// Wraps weights that the caller has already normalized.
    ///
    /// Weights are taken as given; duplicates keep the last value.
    pub fn from_weights<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = (Pair, f64)>,
    {
        let map: BTreeMap<Pair, f64> = weights.into_iter().collect();
        Self {
            entries: map.into_iter().collect(),
        }
    }

    /// Reads and normalizes a `Pair\tFrequency` table.
    pub fn read_tsv(path: impl AsRef<Path>) -> Result<Self, TableError> {
        Self::from_counts(&PairCounts::read_tsv(path)?)
    }

    pub fn get(&self, pair: &Pair) -> Option<f64> {
        self.entries
            .binary_search_by(|(p, _)| p.cmp(pair))
            .ok()
            .map(|i| self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pair, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every symbol that appears on either side of a pair.
    pub fn symbols(&self) -> BTreeSet<char> {
        self.entries
            .iter()
            .flat_map(|(pair, _)| [pair.first, pair.second])
            .collect()
    }

    /// Sum of all weights (1 for tables built from counts).
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }
}

// Deserialized entries are re-sorted so `get` can binary search.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PairFrequencyRecord {
    entries: Vec<(Pair, f64)>,
}

#[cfg(feature = "serde")]
impl From<PairFrequencyRecord> for PairFrequency {
    fn from(record: PairFrequencyRecord) -> Self {
        PairFrequency::from_weights(record.entries)
    }
}
