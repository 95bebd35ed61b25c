//! Statistics and IndexStats.

use crate::corpus::ParseStats;
use crate::index::types::TermFrequency;

/// A snapshot of one indexing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Lines read from the corpus.
    pub lines: usize,
    /// Speeches parsed.
    pub records: usize,
    /// Speeches whose day or year fell back to the sentinel.
    pub malformed_dates: usize,
    /// Incomplete records dropped at line ends.
    pub truncated_strides: usize,
    /// Distinct terms in the global table.
    pub unique_terms: usize,
    /// Tokens counted across all speeches.
    pub total_tokens: u64,
}

impl IndexStats {
    /// Combines parse counters with the accumulated table.
    pub fn new(parse: &ParseStats, table: &TermFrequency) -> Self {
        Self {
            lines: parse.lines,
            records: parse.records,
            malformed_dates: parse.malformed_dates,
            truncated_strides: parse.truncated_strides,
            unique_terms: table.len(),
            total_tokens: table.total_tokens(),
        }
    }

    /// Mean tokens per speech, or 0 for an empty corpus.
    pub fn tokens_per_record(&self) -> f64 {
        if self.records == 0 {
            0.0
        } else {
            self.total_tokens as f64 / self.records as f64
        }
    }
}

impl core::fmt::Display for IndexStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} speeches, {} terms, {} tokens",
            self.records, self.unique_terms, self.total_tokens
        )?;

        if self.malformed_dates > 0 || self.truncated_strides > 0 {
            write!(
                f,
                " ({} malformed dates, {} truncated records)",
                self.malformed_dates, self.truncated_strides
            )?;
        }

        Ok(())
    }
}
