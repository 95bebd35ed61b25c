//! Frequency accumulation.
//!
//! Every token of a speech increments both the corpus-wide table and the
//! speech's own table. Nothing is ever decremented, and the order in which
//! speeches are processed does not change the final counts.

use crate::analyzer::Analyzer;
use crate::corpus::record::bump;
use crate::corpus::SpeechRecord;
use crate::index::types::TermFrequency;

/// Reusable normalization buffers for one worker.
#[derive(Debug, Default)]
pub(crate) struct Buffers {
    scratch: String,
    normalized: String,
}

/// Feeds analyzed speech text into frequency tables.
#[derive(Debug, Clone, Copy)]
pub struct Accumulator<'a> {
    pub(crate) analyzer: &'a Analyzer,
}

impl<'a> Accumulator<'a> {
    /// Creates an accumulator driven by `analyzer`.
    pub fn new(analyzer: &'a Analyzer) -> Self {
        Self { analyzer }
    }

    /// Counts one speech into its own table and into `global`.
    pub fn accumulate_record(&self, record: &mut SpeechRecord, global: &mut TermFrequency) {
        let mut buffers = Buffers::default();
        self.accumulate_with(record, global, &mut buffers);
    }

    pub(crate) fn accumulate_with(
        &self,
        record: &mut SpeechRecord,
        global: &mut TermFrequency,
        buffers: &mut Buffers,
    ) {
        let (text, counts) = record.text_and_frequency_mut();
        self.analyzer.analyze_with(
            text,
            &mut buffers.scratch,
            &mut buffers.normalized,
            |token| {
                global.increment(token);
                bump(counts, token);
            },
        );
    }

    /// Counts one speech into its own table only.
    pub(crate) fn count_record(&self, record: &mut SpeechRecord, buffers: &mut Buffers) {
        let (text, counts) = record.text_and_frequency_mut();
        self.analyzer.analyze_with(
            text,
            &mut buffers.scratch,
            &mut buffers.normalized,
            |token| bump(counts, token),
        );
    }

    /// Counts every speech in order, returning the updated global table.
    pub fn accumulate(&self, records: &mut [SpeechRecord], mut global: TermFrequency) -> TermFrequency {
        let mut buffers = Buffers::default();
        for record in records.iter_mut() {
            self.accumulate_with(record, &mut global, &mut buffers);
        }
        global
    }
}
