//! Parallel index building.
//!
//! Analysis and per-speech counting only read the shared [`Analyzer`], so
//! speeches are counted independently on a worker pool. The corpus-wide
//! table is then reduced on the calling thread by summing each speech's
//! table in corpus order. No worker touches the global table.
//!
//! [`Analyzer`]: crate::analyzer::Analyzer

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use speechdex_types::IndexError;
use tracing::debug;

use crate::corpus::SpeechRecord;
use crate::index::accumulator::{Accumulator, Buffers};
use crate::index::types::TermFrequency;

impl Accumulator<'_> {
    /// Counts every speech on a pool of `workers` threads, then folds the
    /// per-speech tables into `global`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::WorkerPool`] if the pool cannot be started.
    /// `records` and `global` are untouched in that case.
    pub fn accumulate_parallel(
        &self,
        records: &mut [SpeechRecord],
        global: TermFrequency,
        workers: usize,
    ) -> Result<TermFrequency, IndexError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("speechdex-worker-{i}"))
            .build()
            .map_err(|e| IndexError::WorkerPool(e.to_string()))?;

        debug!(
            target: "speechdex::index",
            workers,
            records = records.len(),
            "counting speeches in parallel"
        );

        pool.install(|| {
            records
                .par_iter_mut()
                .for_each_init(Buffers::default, |buffers, record| {
                    self.count_record(record, buffers);
                });
        });

        Ok(reduce(records, global))
    }
}

/// Sums every speech's table into `global`, in corpus order.
pub(crate) fn reduce(records: &[SpeechRecord], mut global: TermFrequency) -> TermFrequency {
    for record in records {
        global.merge_counts(record.term_frequency());
    }
    global
}
