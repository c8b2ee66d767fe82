//! Alphabet and layout (permutation) types.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::ConfigError;

/// The 26 lowercase Latin letters.
pub const LATIN_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

/// A fixed, ordered set of distinct symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "AlphabetRecord"))]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Builds an alphabet, rejecting repeated symbols.
    pub fn new<I: IntoIterator<Item = char>>(symbols: I) -> Result<Self, ConfigError> {
        let mut seen = BTreeSet::new();
        for symbol in symbols {
            if !seen.insert(symbol) {
                return Err(ConfigError::DuplicateKey(symbol));
            }
        }
        Ok(Self {
            symbols: seen.into_iter().collect(),
        })
    }

    /// The lowercase Latin alphabet.
    pub fn latin() -> Self {
        Self {
            symbols: LATIN_LETTERS.chars().collect(),
        }
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.binary_search(&symbol).is_ok()
    }
}

/// A bijection from an alphabet onto itself.
///
/// Keys are held sorted; `values[i]` is the symbol assigned to `keys[i]`.
/// Every constructor validates bijectivity, and the only in-place
/// mutation is a transposition of two assigned values, which keeps the
/// mapping a bijection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "LayoutRecord"))]
pub struct Layout {
    keys: Vec<char>,
    values: Vec<char>,
}

impl Layout {
    /// The identity layout over `alphabet`.
    pub fn identity(alphabet: &Alphabet) -> Self {
        Self {
            keys: alphabet.symbols.clone(),
            values: alphabet.symbols.clone(),
        }
    }

    /// Builds a layout from explicit `key -> value` assignments.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (char, char)>,
    {
        let mut assignments: Vec<(char, char)> = pairs.into_iter().collect();
        assignments.sort_unstable_by_key(|&(key, _)| key);
        for window in assignments.windows(2) {
            if window[0].0 == window[1].0 {
                return Err(ConfigError::DuplicateKey(window[0].0));
            }
        }
        let (keys, values) = assignments.into_iter().unzip();
        let layout = Self { keys, values };
        layout.validate()?;
        Ok(layout)
    }

    /// Builds a layout whose values, in alphabet order, are `images`.
    ///
    /// `Layout::from_images(&Alphabet::latin(), "bacd...")` maps `a -> b`,
    /// `b -> a`, `c -> c`, and so on.
    pub fn from_images(alphabet: &Alphabet, images: &str) -> Result<Self, ConfigError> {
        let values: Vec<char> = images.chars().collect();
        if values.len() != alphabet.len() {
            return Err(ConfigError::LengthMismatch {
                expected: alphabet.len(),
                got: values.len(),
            });
        }
        Self::from_pairs(alphabet.symbols.iter().copied().zip(values))
    }

    /// Checks that the values are exactly the keys, each used once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for &value in &self.values {
            if self.keys.binary_search(&value).is_err() {
                return Err(ConfigError::ForeignValue(value));
            }
            if !seen.insert(value) {
                return Err(ConfigError::DuplicateValue(value));
            }
        }
        Ok(())
    }

    /// The symbol assigned to `key`, if `key` is in the alphabet.
    #[inline]
    pub fn get(&self, key: char) -> Option<char> {
        self.keys
            .binary_search(&key)
            .ok()
            .map(|index| self.values[index])
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[char] {
        &self.keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, char)> + '_ {
        self.keys.iter().copied().zip(self.values.iter().copied())
    }

    /// The alphabet this layout permutes.
    pub fn alphabet(&self) -> Alphabet {
        Alphabet {
            symbols: self.keys.clone(),
        }
    }

    /// The inverse mapping: `inverse.get(v) == Some(k)` iff `get(k) == Some(v)`.
    pub fn inverse(&self) -> Layout {
        let mut pairs: Vec<(char, char)> = self.iter().map(|(k, v)| (v, k)).collect();
        pairs.sort_unstable_by_key(|&(key, _)| key);
        let (keys, values) = pairs.into_iter().unzip();
        Layout { keys, values }
    }

    /// Number of keys whose assignment differs from `other`.
    ///
    /// Layouts over different alphabets count every key of `self` that
    /// `other` maps differently or not at all.
    pub fn distance(&self, other: &Layout) -> usize {
        self.iter()
            .filter(|&(key, value)| other.get(key) != Some(value))
            .count()
    }

    /// Values in key order, e.g. `"abc...z"` for the Latin identity.
    pub fn images(&self) -> String {
        self.values.iter().collect()
    }

    /// Exchanges the values assigned at key indices `i` and `j`.
    pub(crate) fn transpose(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}

// Deserialized data goes through the validating constructors so the
// sorted-keys and bijection invariants hold for every instance.

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct AlphabetRecord {
    symbols: Vec<char>,
}

#[cfg(feature = "serde")]
impl TryFrom<AlphabetRecord> for Alphabet {
    type Error = ConfigError;

    fn try_from(record: AlphabetRecord) -> Result<Self, Self::Error> {
        Alphabet::new(record.symbols)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct LayoutRecord {
    keys: Vec<char>,
    values: Vec<char>,
}

#[cfg(feature = "serde")]
impl TryFrom<LayoutRecord> for Layout {
    type Error = ConfigError;

    fn try_from(record: LayoutRecord) -> Result<Self, Self::Error> {
        if record.keys.len() != record.values.len() {
            return Err(ConfigError::LengthMismatch {
                expected: record.keys.len(),
                got: record.values.len(),
            });
        }
        Layout::from_pairs(record.keys.into_iter().zip(record.values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_rejects_duplicates() {
        assert_eq!(
            Alphabet::new("abca".chars()),
            Err(ConfigError::DuplicateKey('a'))
        );
    }

    #[test]
    fn test_alphabet_sorted() {
        let alphabet = Alphabet::new("cab".chars()).unwrap();
        assert_eq!(alphabet.symbols(), &['a', 'b', 'c']);
        assert!(alphabet.contains('b'));
        assert!(!alphabet.contains('z'));
    }

    #[test]
    fn test_identity() {
        let layout = Layout::identity(&Alphabet::latin());
        assert_eq!(layout.len(), 26);
        assert!(layout.iter().all(|(k, v)| k == v));
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_from_pairs_valid() {
        let layout = Layout::from_pairs([('a', 'b'), ('b', 'c'), ('c', 'a')]).unwrap();
        assert_eq!(layout.get('a'), Some('b'));
        assert_eq!(layout.get('c'), Some('a'));
        assert_eq!(layout.get('z'), None);
    }

    #[test]
    fn test_from_pairs_duplicate_value() {
        let err = Layout::from_pairs([('a', 'b'), ('b', 'b'), ('c', 'a')]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateValue('b'));
    }

    #[test]
    fn test_from_pairs_duplicate_key() {
        let err = Layout::from_pairs([('a', 'a'), ('a', 'b')]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateKey('a'));
    }

    #[test]
    fn test_from_pairs_foreign_value() {
        let err = Layout::from_pairs([('a', 'b'), ('b', 'z')]).unwrap_err();
        assert_eq!(err, ConfigError::ForeignValue('z'));
    }

    #[test]
    fn test_from_images() {
        let alphabet = Alphabet::new("abc".chars()).unwrap();
        let layout = Layout::from_images(&alphabet, "cab").unwrap();
        assert_eq!(layout.get('a'), Some('c'));
        assert_eq!(layout.images(), "cab");

        assert!(matches!(
            Layout::from_images(&alphabet, "ab"),
            Err(ConfigError::LengthMismatch { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn test_inverse_round_trip() {
        let layout = Layout::from_pairs([('a', 'c'), ('b', 'a'), ('c', 'b')]).unwrap();
        let inverse = layout.inverse();
        for (key, value) in layout.iter() {
            assert_eq!(inverse.get(value), Some(key));
        }
        assert_eq!(inverse.inverse(), layout);
    }

    #[test]
    fn test_distance_and_transpose() {
        let identity = Layout::identity(&Alphabet::latin());
        let mut swapped = identity.clone();
        swapped.transpose(0, 25);
        assert_eq!(swapped.get('a'), Some('z'));
        assert_eq!(swapped.get('z'), Some('a'));
        assert_eq!(identity.distance(&swapped), 2);
        assert!(swapped.validate().is_ok());
    }

    #[test]
    fn test_display() {
        let layout = Layout::from_pairs([('a', 'b'), ('b', 'a')]).unwrap();
        assert_eq!(layout.to_string(), "{a: b, b: a}");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_sorts_keys() {
        let layout: Layout =
            serde_json::from_str(r#"{"keys":["c","a","b"],"values":["a","b","c"]}"#).unwrap();
        assert_eq!(layout.keys(), &['a', 'b', 'c']);
        assert_eq!(layout.get('c'), Some('a'));
        assert_eq!(layout.get('a'), Some('b'));
        assert!(layout.validate().is_ok());

        let alphabet: Alphabet = serde_json::from_str(r#"{"symbols":["c","a","b"]}"#).unwrap();
        assert!(alphabet.contains('a'));
        assert_eq!(alphabet.symbols(), &['a', 'b', 'c']);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_rejects_non_bijection() {
        assert!(serde_json::from_str::<Layout>(r#"{"keys":["a","b"],"values":["a","a"]}"#).is_err());
        assert!(serde_json::from_str::<Layout>(r#"{"keys":["a","b"],"values":["a"]}"#).is_err());
        assert!(serde_json::from_str::<Alphabet>(r#"{"symbols":["a","a"]}"#).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let layout = Layout::from_pairs([('a', 'c'), ('b', 'a'), ('c', 'b')]).unwrap();
        let text = serde_json::to_string(&layout).unwrap();
        assert_eq!(serde_json::from_str::<Layout>(&text).unwrap(), layout);
    }
}
