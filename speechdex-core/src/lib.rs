//! Speech corpus parsing and inverted term-frequency indexing.
//!
//! A run moves through four stages:
//!
//! - [`corpus`]: splits marker-delimited lines into [`SpeechRecord`]s
//! - [`analyzer`]: normalizes speech text and tokenizes it
//! - [`index`]: counts tokens into a corpus-wide table and one table per speech
//! - [`index::emitter`]: writes the global table as `term\tcount` rows
//!
//! [`Pipeline`] wires the stages together.
//!
//! ```
//! use speechdex_core::{Pipeline, StopWordSet};
//! use speechdex_types::{IndexConfig, TermEntry};
//!
//! let stop = StopWordSet::from_words(["the", "of"]).unwrap();
//! let pipeline = Pipeline::new(stop, IndexConfig::clean());
//!
//! let corpus = "NEW ADDRESS=>FIRSTNAME=AbeLASTNAME=LincolnMONTH=NovemberDAY=19\
//!               YEAR=1863WEBLINK=wFILELINK=fSPEECH=The union of the people, the union.";
//! let run = pipeline.run_str(corpus);
//!
//! assert_eq!(run.records.len(), 1);
//! assert_eq!(run.entries(), vec![TermEntry::new("people", 1), TermEntry::new("union", 2)]);
//! ```

pub mod analyzer;
pub mod config;
pub mod corpus;
pub mod error_log;
pub mod index;
pub mod pipeline;

pub use analyzer::{Analyzer, StopWordSet};
pub use corpus::{CorpusParser, ParsedCorpus, SpeechKey, SpeechRecord};
pub use error_log::ErrorLog;
pub use index::{Accumulator, IndexStats, TermFrequency, TermSink, TsvSink};
pub use pipeline::{IndexRun, Pipeline, RunOutcome};
