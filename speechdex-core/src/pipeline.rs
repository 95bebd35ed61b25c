//! End-to-end indexing runs.
//!
//! A [`Pipeline`] owns the loaded stop words and run settings. Each call to
//! one of the `run_*` methods parses a corpus, counts every speech, and
//! returns an [`IndexRun`] holding the records, the global table and any
//! failures seen along the way. Emission is a separate step so callers can
//! choose their own sink.
//!
//! Corpus read failures and sink failures never abort the process. They are
//! reported to the [`ErrorLog`] and surfaced on the returned values, and
//! whatever was produced before the failure is kept.

use std::fs::File;
use std::io::{BufRead, Cursor};
use std::path::Path;

use speechdex_types::{IndexConfig, IndexError, TermEntry};
use tracing::{info, warn};

use crate::analyzer::{Analyzer, StopWordSet};
use crate::corpus::{CorpusParser, ParsedCorpus, ParseStats, SpeechRecord};
use crate::error_log::ErrorLog;
use crate::index::emitter::{write_document_frequencies_counted, write_table_counted};
use crate::index::{emit, Accumulator};
use crate::index::{IndexStats, TermFrequency, TermSink, TsvSink};

/// Loaded stop words plus run settings.
#[derive(Debug, Clone)]
pub struct Pipeline {
    analyzer: Analyzer,
    config: IndexConfig,
    error_log: ErrorLog,
}

impl Pipeline {
    /// Creates a pipeline that reports failures through `tracing` only.
    pub fn new(stop_words: StopWordSet, config: IndexConfig) -> Self {
        Self {
            analyzer: Analyzer::new(stop_words).keep_empty_tokens(config.keep_empty_tokens),
            config,
            error_log: ErrorLog::disabled(),
        }
    }

    /// Loads the stop-word list at `path` and creates a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::StopWords`] if the list cannot be read. No
    /// corpus work is possible without it.
    pub fn from_stop_path(path: impl AsRef<Path>, config: IndexConfig) -> Result<Self, IndexError> {
        let stop_words = StopWordSet::from_path(path)?;
        Ok(Self::new(stop_words, config))
    }

    /// Sends failure reports to `log` as well.
    pub fn with_error_log(mut self, log: ErrorLog) -> Self {
        self.error_log = log;
        self
    }

    /// Run settings.
    #[inline]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The analyzer used for every speech.
    #[inline]
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// The failure log.
    #[inline]
    pub fn error_log(&self) -> &ErrorLog {
        &self.error_log
    }

    /// Parses and indexes the corpus file at `path`.
    ///
    /// A missing or unreadable file yields a run with no records and the
    /// failure recorded.
    pub fn run_path(&self, path: impl AsRef<Path>) -> IndexRun {
        self.index(CorpusParser::new().parse_path(path))
    }

    /// Parses and indexes a corpus from `reader`.
    pub fn run_reader<R: BufRead>(&self, reader: R) -> IndexRun {
        self.index(CorpusParser::new().parse_reader(reader))
    }

    /// Parses and indexes an in-memory corpus.
    pub fn run_str(&self, text: &str) -> IndexRun {
        self.run_reader(Cursor::new(text))
    }

    /// Counts every speech of an already parsed corpus.
    pub fn index(&self, corpus: ParsedCorpus) -> IndexRun {
        let ParsedCorpus {
            mut records,
            stats,
            error,
        } = corpus;

        let mut failures = Vec::new();
        if let Some(err) = error {
            self.error_log.record("parse", &err);
            failures.push(err);
        }

        let term_frequency = self.accumulate(&mut records, &mut failures);

        info!(
            target: "speechdex::index",
            records = records.len(),
            unique_terms = term_frequency.len(),
            total_tokens = term_frequency.total_tokens(),
            "corpus indexed"
        );

        IndexRun {
            records,
            term_frequency,
            parse_stats: stats,
            failures,
            config: self.config,
        }
    }

    fn accumulate(&self, records: &mut [SpeechRecord], failures: &mut Vec<IndexError>) -> TermFrequency {
        let acc = Accumulator::new(&self.analyzer);

        if self.config.is_parallel() {
            match acc.accumulate_parallel(records, TermFrequency::new(), self.config.workers) {
                Ok(table) => return table,
                Err(err) => {
                    warn!(
                        target: "speechdex::index",
                        error = %err,
                        "worker pool unavailable, counting on the calling thread"
                    );
                    self.error_log.record("index", &err);
                    failures.push(err);
                }
            }
        }

        acc.accumulate(records, TermFrequency::new())
    }

    /// Writes the run's global table to `sink`.
    pub fn emit<S: TermSink + ?Sized>(&self, run: &IndexRun, sink: &mut S) -> RunOutcome {
        let entries = run.entries();
        let mut rows = 0;
        let outcome = match write_table_counted(&entries, sink, &mut rows) {
            Ok(()) => RunOutcome::written(rows),
            Err(err) => RunOutcome::failed(rows, err),
        };
        self.report(&outcome, "emit");
        outcome
    }

    /// Writes the run's global table as TSV to a new file at `path`.
    pub fn emit_to_path(&self, run: &IndexRun, path: impl AsRef<Path>) -> RunOutcome {
        match File::create(path.as_ref()) {
            Ok(file) => self.emit(run, &mut TsvSink::new(file)),
            Err(source) => {
                let outcome = RunOutcome::failed(0, IndexError::Sink(source));
                self.report(&outcome, "emit");
                outcome
            }
        }
    }

    /// Writes every speech's own table as TSV to a new file at `path`.
    pub fn emit_documents_to_path(&self, run: &IndexRun, path: impl AsRef<Path>) -> RunOutcome {
        let mut rows = 0;
        let written = File::create(path.as_ref())
            .map_err(IndexError::Sink)
            .and_then(|file| {
                write_document_frequencies_counted(&run.records, self.config.emit_order, file, &mut rows)
            });

        let outcome = match written {
            Ok(()) => RunOutcome::written(rows),
            Err(err) => RunOutcome::failed(rows, err),
        };
        self.report(&outcome, "emit-documents");
        outcome
    }

    fn report(&self, outcome: &RunOutcome, stage: &str) {
        match &outcome.error {
            Some(err) => self.error_log.record(stage, err),
            None => info!(target: "speechdex::emit", stage, rows = outcome.rows_written, "table written"),
        }
    }
}

/// Everything produced by one indexing run.
#[derive(Debug)]
pub struct IndexRun {
    /// Speeches in corpus order, each holding its own term table.
    pub records: Vec<SpeechRecord>,
    /// Corpus-wide term counts.
    pub term_frequency: TermFrequency,
    /// Parser counters.
    pub parse_stats: ParseStats,
    /// Failures that cut the run short or forced a fallback.
    pub failures: Vec<IndexError>,
    config: IndexConfig,
}

impl IndexRun {
    /// The global table as rows in the configured order.
    pub fn entries(&self) -> Vec<TermEntry> {
        emit(&self.term_frequency, self.config.emit_order)
    }

    /// Summary counters.
    pub fn stats(&self) -> IndexStats {
        IndexStats::new(&self.parse_stats, &self.term_frequency)
    }

    /// Returns `true` if nothing went wrong.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns `true` if the corpus was only partly read.
    pub fn is_partial(&self) -> bool {
        self.failures
            .iter()
            .any(|e| matches!(e, IndexError::CorpusRead { .. }))
    }
}

/// Result of writing one table.
#[derive(Debug)]
pub struct RunOutcome {
    /// Rows the sink accepted, counted up to the first failure. A buffered
    /// sink may still lose accepted rows if its final flush fails.
    pub rows_written: usize,
    /// The sink failure, if any.
    pub error: Option<IndexError>,
}

impl RunOutcome {
    fn written(rows: usize) -> Self {
        Self {
            rows_written: rows,
            error: None,
        }
    }

    fn failed(rows: usize, err: IndexError) -> Self {
        Self {
            rows_written: rows,
            error: Some(err),
        }
    }

    /// Returns `true` if every row was written.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
