//! Per-pair cost lookup.

use std::collections::HashMap;
use std::path::Path;

use super::pair::Pair;
use super::read_source;
use crate::error::TableError;

/// Cost of typing a pair of physical key positions.
///
/// The table need not be total. The objective treats an absent pair as
/// costing nothing.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairCost {
    costs: HashMap<Pair, f64>,
}

impl PairCost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses whitespace-separated `pair cost` lines.
    ///
    /// Blank lines are ignored. Costs must be finite and non-negative.
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let mut costs = HashMap::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let line_no = index + 1;
            let mut fields = line.split_whitespace();
            let (Some(pair_field), Some(cost_field), None) =
                (fields.next(), fields.next(), fields.next())
            else {
                return Err(TableError::malformed(line_no, line, "expected `pair cost`"));
            };
            let pair = Pair::parse(pair_field).ok_or_else(|| {
                TableError::malformed(line_no, line, "pair must be exactly two symbols")
            })?;
            let cost = cost_field
                .parse::<f64>()
                .map_err(|e| TableError::malformed(line_no, line, format!("invalid cost: {e}")))?;
            if !cost.is_finite() || cost < 0.0 {
                return Err(TableError::malformed(
                    line_no,
                    line,
                    "cost must be finite and non-negative",
                ));
            }
            costs.insert(pair, cost);
        }
        Ok(Self { costs })
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let text = read_source(path.as_ref())?;
        Self::parse(&text)
    }

    pub fn insert(&mut self, pair: Pair, cost: f64) {
        self.costs.insert(pair, cost);
    }

    pub fn get(&self, pair: &Pair) -> Option<f64> {
        self.costs.get(pair).copied()
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

impl FromIterator<(Pair, f64)> for PairCost {
    fn from_iter<I: IntoIterator<Item = (Pair, f64)>>(iter: I) -> Self {
        Self {
            costs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let table = PairCost::parse("th 2.0\nhe\t3.5\n\n  qa   1\n").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get(&Pair::new('h', 'e')), Some(3.5));
        assert_eq!(table.get(&Pair::new('q', 'a')), Some(1.0));
        assert_eq!(table.get(&Pair::new('z', 'z')), None);
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert!(PairCost::parse("th -1.0\n").is_err());
    }

    #[test]
    fn test_parse_rejects_nan() {
        assert!(PairCost::parse("th NaN\n").is_err());
    }

    #[test]
    fn test_parse_reports_line() {
        let err = PairCost::parse("th 1.0\nhe\n").unwrap_err();
        match err {
            TableError::Malformed { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = PairCost::read("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, TableError::Io { .. }));
    }
}
