//! Inverted term-frequency index.
//!
//! Builds two tables from analyzed speech text:
//! - the corpus-wide [`TermFrequency`], passed in and returned explicitly
//! - one table per [`SpeechRecord`](crate::corpus::SpeechRecord), owned by
//!   the record
//!
//! Invariant: for every term, the global count equals the sum of that
//! term's count over all speech tables.

mod accumulator;
mod builder;
pub mod emitter;
mod stats;
mod types;

pub use accumulator::Accumulator;
pub use emitter::{emit, write_document_frequencies, write_table, TermSink, TsvSink};
pub use stats::IndexStats;
pub use types::TermFrequency;
