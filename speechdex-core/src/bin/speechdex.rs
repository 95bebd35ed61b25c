//! Speech corpus indexer.
//!
//! Reads a marker-delimited speech corpus, removes stop words, and writes
//! the corpus-wide `term\tcount` table.
//!
//! ```bash
//! speechdex --corpus speeches.txt
//! speechdex --corpus speeches.txt --stop-words stop.txt --order freq --workers 0
//! speechdex --corpus speeches.txt --doc-output per_speech.tsv --drop-empty
//! speechdex --corpus speeches.txt --faithful
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `speechdex=info`).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use speechdex_core::config;
use speechdex_core::{ErrorLog, Pipeline};
use speechdex_types::{EmitOrder, IndexConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "speechdex", about = "Inverted term-frequency index for speech corpora")]
struct Args {
    /// Corpus file, one or more marker-delimited speeches per line
    #[arg(short, long)]
    corpus: PathBuf,

    /// Stop-word list, one word per line
    #[arg(short, long, default_value = config::DEFAULT_STOP_FILE)]
    stop_words: PathBuf,

    /// Output file for the global term table
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Also write each speech's own term table here
    #[arg(long)]
    doc_output: Option<PathBuf>,

    /// Free-text log of failures
    #[arg(long, default_value = config::DEFAULT_ERROR_LOG)]
    error_log: PathBuf,

    /// Row order: lex, freq or unordered
    #[arg(long, default_value = "lex", value_parser = parse_order)]
    order: EmitOrder,

    /// Do not count the empty token
    #[arg(long, default_value_t = false)]
    drop_empty: bool,

    /// Historical output: map-order rows, empty token kept
    #[arg(long, default_value_t = false, conflicts_with_all = ["order", "drop_empty"])]
    faithful: bool,

    /// Counting threads (0 = one per core)
    #[arg(short, long, default_value_t = 1)]
    workers: usize,
}

fn parse_order(name: &str) -> Result<EmitOrder, String> {
    EmitOrder::from_name(name).ok_or_else(|| format!("unknown order `{name}` (expected lex, freq or unordered)"))
}

impl Args {
    fn index_config(&self) -> IndexConfig {
        let workers = match self.workers {
            0 => config::available_workers(),
            n => n,
        };
        if self.faithful {
            return IndexConfig::faithful().with_workers(workers);
        }
        IndexConfig {
            emit_order: self.order,
            keep_empty_tokens: !self.drop_empty,
            workers,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = Args::parse();
    let error_log = ErrorLog::to_path(&args.error_log);

    let pipeline = match Pipeline::from_stop_path(&args.stop_words, args.index_config()) {
        Ok(p) => p.with_error_log(error_log.clone()),
        Err(err) => {
            error_log.record("stop-words", &err);
            return ExitCode::FAILURE;
        }
    };

    let run = pipeline.run_path(&args.corpus);
    info!(target: "speechdex::cli", "{}", run.stats());

    let mut ok = run.is_complete();

    let outcome = pipeline.emit_to_path(&run, &args.output);
    ok &= outcome.is_success();
    if outcome.is_success() {
        info!(
            target: "speechdex::cli",
            path = %args.output.display(),
            rows = outcome.rows_written,
            "index written"
        );
    }

    if let Some(path) = &args.doc_output {
        let outcome = pipeline.emit_documents_to_path(&run, path);
        ok &= outcome.is_success();
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        error!(
            target: "speechdex::cli",
            log = %args.error_log.display(),
            "run finished with failures"
        );
        ExitCode::FAILURE
    }
}
