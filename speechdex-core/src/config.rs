//! Default locations and settings.

use std::num::NonZeroUsize;
use std::thread;

/// Stop-word list, one word per line.
pub const DEFAULT_STOP_FILE: &str = "stop.txt";

/// Corpus-wide `term\tcount` table.
pub const DEFAULT_OUTPUT_FILE: &str = "Speech_Inverted_Index.tsv";

/// Free-text log of failures that cut a run short.
pub const DEFAULT_ERROR_LOG: &str = "ErrorLog.txt";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "speechdex=info";

/// Worker count for `--workers 0`: one per available core.
pub fn available_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
