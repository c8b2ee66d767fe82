//! Error types shared across the crate.
//!
//! Two families exist: [`ConfigError`] is raised before a search starts
//! (degenerate annealing parameters, invalid layouts), and [`TableError`]
//! is raised while reading frequency, cost, or corpus sources.

use std::path::PathBuf;

use thiserror::Error;

use crate::tables::Pair;

pub const ERROR_INVALID_TEMPERATURE: &str = "KL-0001";
pub const ERROR_INVALID_COOLING: &str = "KL-0002";
pub const ERROR_INVALID_BUDGET: &str = "KL-0003";
pub const ERROR_INVALID_LAYOUT: &str = "KL-0004";
pub const ERROR_ALPHABET_MISMATCH: &str = "KL-0005";
pub const ERROR_TABLE_IO: &str = "KL-0101";
pub const ERROR_TABLE_MALFORMED: &str = "KL-0102";
pub const ERROR_TABLE_EMPTY: &str = "KL-0103";
pub const ERROR_COUNT_OVERFLOW: &str = "KL-0104";

/// A configuration or layout problem detected before the search loop runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("initial_temperature must be positive and finite, got {0}")]
    InitialTemperature(f64),
    #[error("termination_threshold must be positive and below initial_temperature, got {threshold} (initial {initial})")]
    TerminationThreshold { threshold: f64, initial: f64 },
    #[error("cooling_rate must be in (0, 1), got {0}")]
    CoolingRate(f64),
    #[error("max_iter_per_temperature must be at least 1")]
    ZeroIterations,
    #[error("max_swaps_per_proposal must be at least 1")]
    ZeroSwaps,
    #[error("alphabet needs at least two symbols to propose a transposition, got {0}")]
    AlphabetTooSmall(usize),
    #[error("symbol `{0}` appears more than once as a key")]
    DuplicateKey(char),
    #[error("symbol `{0}` appears more than once as an assigned value")]
    DuplicateValue(char),
    #[error("assigned value `{0}` is not a key of the layout")]
    ForeignValue(char),
    #[error("layout string has {got} symbols but the alphabet has {expected}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("frequency table uses symbol `{0}` that the layout does not map")]
    AlphabetMismatch(char),
}

impl ConfigError {
    pub fn stable_code(&self) -> &'static str {
        match self {
            Self::InitialTemperature(_) | Self::TerminationThreshold { .. } => {
                ERROR_INVALID_TEMPERATURE
            }
            Self::CoolingRate(_) => ERROR_INVALID_COOLING,
            Self::ZeroIterations | Self::ZeroSwaps | Self::AlphabetTooSmall(_) => {
                ERROR_INVALID_BUDGET
            }
            Self::DuplicateKey(_)
            | Self::DuplicateValue(_)
            | Self::ForeignValue(_)
            | Self::LengthMismatch { .. } => ERROR_INVALID_LAYOUT,
            Self::AlphabetMismatch(_) => ERROR_ALPHABET_MISMATCH,
        }
    }
}

/// A failure while reading or parsing an input table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {reason} (`{content}`)")]
    Malformed {
        line: usize,
        content: String,
        reason: String,
    },
    #[error("{0} table has no usable records")]
    Empty(&'static str),
    #[error("count for pair `{0}` exceeds u64::MAX")]
    CountOverflow(Pair),
}

impl TableError {
    pub(crate) fn malformed(line: usize, content: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }

    pub fn stable_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => ERROR_TABLE_IO,
            Self::Malformed { .. } => ERROR_TABLE_MALFORMED,
            Self::Empty(_) => ERROR_TABLE_EMPTY,
            Self::CountOverflow(_) => ERROR_COUNT_OVERFLOW,
        }
    }
}
