//! Core types shared across the speechdex workspace.
//!
//! This crate holds the value types that cross crate boundaries:
//!
//! - **Frequencies and table rows**: [`Frequency`], [`TermEntry`]
//! - **Run configuration**: [`IndexConfig`], [`EmitOrder`]
//! - **Errors**: [`IndexError`] for pipeline I/O, [`RecordParseError`] for
//!   strict single-record parsing
//!
//! Nothing here performs I/O; the core crate owns parsing and indexing.

#![warn(missing_docs)]

use core::cmp::Ordering;
use core::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Occurrence count of a term, either corpus-wide or within one speech.
pub type Frequency = u32;

/// Value substituted for a day or year field that does not parse as an integer.
pub const SENTINEL: i32 = -1;

/// One row of an emitted frequency table.
///
/// The natural ordering is lexicographic by term, then by count. This is
/// the order used by [`EmitOrder::Lexicographic`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermEntry {
    /// Normalized token. May be the empty string.
    pub term: String,
    /// Number of occurrences.
    pub count: Frequency,
}

impl TermEntry {
    /// Creates a new table row.
    #[inline]
    pub fn new(term: impl Into<String>, count: Frequency) -> Self {
        Self {
            term: term.into(),
            count,
        }
    }

    /// Orders by count (highest first), breaking ties lexicographically.
    #[inline]
    pub fn cmp_by_frequency(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.term.cmp(&other.term))
    }
}

impl PartialOrd for TermEntry {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TermEntry {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> Ordering {
        match self.term.cmp(&other.term) {
            Ordering::Equal => self.count.cmp(&other.count),
            ord => ord,
        }
    }
}

impl From<(String, Frequency)> for TermEntry {
    #[inline]
    fn from((term, count): (String, Frequency)) -> Self {
        Self { term, count }
    }
}

impl From<TermEntry> for (String, Frequency) {
    #[inline]
    fn from(entry: TermEntry) -> Self {
        (entry.term, entry.count)
    }
}

/// Tab-separated `term\tcount`, the on-disk row format.
impl fmt::Display for TermEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.term, self.count)
    }
}

/// Order in which a frequency table is emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmitOrder {
    /// Sorted by term. Reproducible across runs and platforms.
    #[default]
    Lexicographic,
    /// Whatever order the underlying hash map iterates in.
    /// Not stable across implementations or hasher seeds.
    Unordered,
    /// Highest count first, ties broken by term.
    ByFrequency,
}

impl EmitOrder {
    /// Parses the CLI spelling of an order (`lex`, `unordered`, `freq`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "lex" | "lexicographic" => Some(Self::Lexicographic),
            "unordered" | "none" => Some(Self::Unordered),
            "freq" | "frequency" => Some(Self::ByFrequency),
            _ => None,
        }
    }
}

/// Indexing run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Order of the emitted tables.
    pub emit_order: EmitOrder,
    /// Whether the empty-string token produced at whitespace run
    /// boundaries is counted like any other token.
    /// Default: true
    pub keep_empty_tokens: bool,
    /// Number of worker threads for normalization and per-record
    /// accumulation. Values of 0 or 1 run on the calling thread.
    pub workers: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            emit_order: EmitOrder::Lexicographic,
            keep_empty_tokens: true,
            workers: 1,
        }
    }
}

impl IndexConfig {
    /// Reproduces historical output byte for byte where possible:
    /// map-order emission, empty tokens kept, single thread.
    pub const fn faithful() -> Self {
        Self {
            emit_order: EmitOrder::Unordered,
            keep_empty_tokens: true,
            workers: 1,
        }
    }

    /// Sorted output without the empty-string token.
    pub const fn clean() -> Self {
        Self {
            emit_order: EmitOrder::Lexicographic,
            keep_empty_tokens: false,
            workers: 1,
        }
    }

    /// Returns this configuration with the given worker count.
    pub const fn with_workers(self, workers: usize) -> Self {
        Self { workers, ..self }
    }

    /// Returns `true` when accumulation should run on a worker pool.
    #[inline]
    pub const fn is_parallel(&self) -> bool {
        self.workers > 1
    }
}

/// Errors raised at the boundaries of an indexing run.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The stop-word list could not be read. Normalization cannot proceed.
    #[error("failed to read stop words from {path}: {source}")]
    StopWords {
        /// Location of the stop-word list.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The stop words could not be compiled into a removal pattern.
    #[error("failed to compile stop-word pattern: {0}")]
    StopPattern(String),
    /// The corpus source failed part way through.
    #[error("failed to read corpus after {records} records: {source}")]
    CorpusRead {
        /// Records successfully parsed before the failure.
        records: usize,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The output sink rejected a write.
    #[error("failed to write frequency table: {0}")]
    Sink(#[source] io::Error),
    /// The worker pool could not be started.
    #[error("failed to start worker pool: {0}")]
    WorkerPool(String),
}

/// Errors from strict parsing of a single marker-formatted record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordParseError {
    /// A field marker was not found in the input.
    #[error("missing field marker `{0}`")]
    MissingField(&'static str),
    /// The day field is not an integer.
    #[error("invalid day: {0:?}")]
    InvalidDay(String),
    /// The year field is not an integer.
    #[error("invalid year: {0:?}")]
    InvalidYear(String),
}
