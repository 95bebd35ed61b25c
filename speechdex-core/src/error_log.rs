//! Free-text failure log.
//!
//! Failures that cut a run short are reported through `tracing` and, when a
//! path is configured, appended as plain text lines to a separate log file.
//! Writing the log never fails the run.

use std::error::Error;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{error, warn};

/// Destination for failure reports.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
    path: Option<PathBuf>,
}

impl ErrorLog {
    /// Reports through `tracing` only.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Also appends reports to the file at `path`.
    pub fn to_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// The log file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Reports `err` as one line tagged with `stage`.
    pub fn record(&self, stage: &str, err: &dyn Error) {
        error!(target: "speechdex::pipeline", stage, error = %err, "run failure");

        let Some(path) = &self.path else {
            return;
        };

        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| writeln!(file, "[{stage}] {err}"));

        if let Err(e) = written {
            warn!(
                target: "speechdex::pipeline",
                path = %path.display(),
                error = %e,
                "could not write error log"
            );
        }
    }
}
