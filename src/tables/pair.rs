//! Ordered symbol pairs.

use std::fmt;

/// An ordered pair of symbols, e.g. the bigram `th`.
///
/// In a frequency table the symbols come from source text; in a cost
/// table they name physical key positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pair {
    pub first: char,
    pub second: char,
}

impl Pair {
    pub fn new(first: char, second: char) -> Self {
        Self { first, second }
    }

    /// Parses a token that holds exactly two symbols.
    pub fn parse(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let first = chars.next()?;
        let second = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self { first, second })
    }

    /// Returns `true` when both symbols are alphabetic.
    pub fn is_alphabetic(&self) -> bool {
        self.first.is_alphabetic() && self.second.is_alphabetic()
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_symbols() {
        assert_eq!(Pair::parse("th"), Some(Pair::new('t', 'h')));
        assert_eq!(Pair::parse("é;"), Some(Pair::new('é', ';')));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(Pair::parse(""), None);
        assert_eq!(Pair::parse("t"), None);
        assert_eq!(Pair::parse("the"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Pair::new('h', 'e').to_string(), "he");
    }

    #[test]
    fn test_alphabetic() {
        assert!(Pair::new('a', 'b').is_alphabetic());
        assert!(!Pair::new('a', '-').is_alphabetic());
    }
}
