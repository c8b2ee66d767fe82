//! Pair counting over a word-frequency corpus.
//!
//! The corpus is a lemma listing: a fixed preamble, then tab-separated
//! rows whose second column is the word and fourth column its count.
//! Every adjacent alphabetic symbol pair inside a word is credited with
//! the word's count.

use std::path::Path;

use tracing::{debug, warn};

use super::frequency::PairCounts;
use super::pair::Pair;
use super::read_source;
use crate::error::TableError;

/// Lines of preamble before the first data row.
pub const CORPUS_PREAMBLE_LINES: usize = 9;

const WORD_COLUMN: usize = 1;
const COUNT_COLUMN: usize = 3;

/// Outcome of aggregating a corpus.
#[derive(Debug, Clone, Default)]
pub struct CorpusStats {
    /// Aggregated pair counts.
    pub counts: PairCounts,
    /// Data rows that were read.
    pub rows: usize,
    /// Rows dropped for having too few columns, an unparsable count, or a
    /// count that would overflow a pair total.
    pub skipped_rows: usize,
}

/// Aggregates pair counts from corpus text.
///
/// Rows that do not have the expected shape are skipped rather than
/// failing the whole aggregation.
pub fn aggregate(text: &str) -> CorpusStats {
    let mut stats = CorpusStats::default();

    for line in text.lines().skip(CORPUS_PREAMBLE_LINES) {
        stats.rows += 1;
        let columns: Vec<&str> = line.trim().split('\t').collect();
        if columns.len() <= COUNT_COLUMN {
            stats.skipped_rows += 1;
            continue;
        }

        let word = columns[WORD_COLUMN].trim().to_lowercase();
        let Ok(count) = columns[COUNT_COLUMN].trim().parse::<u64>() else {
            stats.skipped_rows += 1;
            continue;
        };

        let symbols: Vec<char> = word.chars().collect();
        let pairs: Vec<Pair> = symbols
            .windows(2)
            .map(|window| Pair::new(window[0], window[1]))
            .filter(Pair::is_alphabetic)
            .collect();
        if let Err(e) = stats.counts.add_all(&pairs, count) {
            debug!(word = %word, error = %e, "row dropped");
            stats.skipped_rows += 1;
        }
    }

    if stats.skipped_rows > 0 {
        warn!(
            skipped = stats.skipped_rows,
            rows = stats.rows,
            "corpus rows dropped during aggregation"
        );
    }
    debug!(pairs = stats.counts.len(), rows = stats.rows, "corpus aggregated");
    stats
}

/// Reads and aggregates a corpus file.
pub fn aggregate_file(path: impl AsRef<Path>) -> Result<CorpusStats, TableError> {
    let text = read_source(path.as_ref())?;
    Ok(aggregate(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(rows: &[&str]) -> String {
        let mut text = "preamble\n".repeat(CORPUS_PREAMBLE_LINES);
        for row in rows {
            text.push_str(row);
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_aggregate_counts_pairs() {
        let text = corpus(&["1\tThe\tdet\t10", "2\then\tn\t3"]);
        let stats = aggregate(&text);

        assert_eq!(stats.rows, 2);
        assert_eq!(stats.skipped_rows, 0);
        // "the" -> th, he ; "hen" -> he, en
        assert_eq!(stats.counts.get(&Pair::new('t', 'h')), Some(10));
        assert_eq!(stats.counts.get(&Pair::new('h', 'e')), Some(13));
        assert_eq!(stats.counts.get(&Pair::new('e', 'n')), Some(3));
    }

    #[test]
    fn test_aggregate_ignores_preamble() {
        let mut text = String::from("0\tzz\tx\t100\n");
        text.push_str(&corpus(&["1\tab\tx\t1"]));
        let stats = aggregate(&text);
        assert_eq!(stats.counts.get(&Pair::new('z', 'z')), None);
        assert_eq!(stats.counts.get(&Pair::new('a', 'b')), Some(1));
    }

    #[test]
    fn test_aggregate_skips_non_alphabetic_pairs() {
        let stats = aggregate(&corpus(&["1\tco-op\tn\t2"]));
        assert_eq!(stats.counts.get(&Pair::new('c', 'o')), Some(2));
        assert_eq!(stats.counts.get(&Pair::new('o', '-')), None);
        assert_eq!(stats.counts.get(&Pair::new('-', 'o')), None);
        assert_eq!(stats.counts.get(&Pair::new('o', 'p')), Some(2));
    }

    #[test]
    fn test_aggregate_skips_malformed_rows() {
        let stats = aggregate(&corpus(&["1\tab\tn", "2\tcd\tn\tlots", "", "3\tef\tn\t4"]));
        assert_eq!(stats.rows, 4);
        assert_eq!(stats.skipped_rows, 3);
        assert_eq!(stats.counts.len(), 1);
        assert_eq!(stats.counts.get(&Pair::new('e', 'f')), Some(4));
    }

    #[test]
    fn test_aggregate_skips_overflowing_row() {
        let stats = aggregate(&corpus(&[
            "1\tab\tn\t18446744073709551615",
            "2\tcab\tn\t1",
            "3\tcd\tn\t2",
        ]));
        assert_eq!(stats.rows, 3);
        assert_eq!(stats.skipped_rows, 1);
        assert_eq!(stats.counts.get(&Pair::new('a', 'b')), Some(u64::MAX));
        // The overflowing row credits none of its pairs.
        assert_eq!(stats.counts.get(&Pair::new('c', 'a')), None);
        assert_eq!(stats.counts.get(&Pair::new('c', 'd')), Some(2));
    }

    #[test]
    fn test_aggregate_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lemmas.txt");
        std::fs::write(&path, corpus(&["1\tThe\tdet\t10", "2\tbad"])).unwrap();

        let stats = aggregate_file(&path).unwrap();
        assert_eq!(stats.rows, 2);
        assert_eq!(stats.skipped_rows, 1);
        assert_eq!(stats.counts.to_tsv(), "Pair\tFrequency\nhe\t10\nth\t10\n");

        assert!(matches!(
            aggregate_file(dir.path().join("missing.txt")),
            Err(TableError::Io { .. })
        ));
    }
}
