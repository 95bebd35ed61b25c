//! End-to-end indexing runs against files on disk.

use std::fs;
use std::io::{self, BufReader, Read};
use std::path::Path;

use speechdex_core::{ErrorLog, Pipeline, StopWordSet, TermSink};
use speechdex_types::{EmitOrder, IndexConfig, IndexError, TermEntry, SENTINEL};
use tempfile::TempDir;

fn speech(first: &str, last: &str, month: &str, day: &str, year: &str, text: &str) -> String {
    format!(
        "NEW ADDRESS=>FIRSTNAME={first}LASTNAME={last}MONTH={month}DAY={day}YEAR={year}\
         WEBLINK=http://speeches/{last}FILELINK=./{last}.txtSPEECH={text}"
    )
}

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

fn pipeline_in(dir: &TempDir, config: IndexConfig) -> Pipeline {
    let stop = write(dir, "stop.txt", "the\nof\nand\n");
    Pipeline::from_stop_path(stop, config).expect("stop words load")
}

fn read_rows(path: &Path) -> Vec<(String, u32)> {
    fs::read_to_string(path)
        .expect("output exists")
        .lines()
        .map(|line| {
            let (term, count) = line.rsplit_once('\t').expect("tab-separated row");
            (term.to_string(), count.parse().expect("numeric count"))
        })
        .collect()
}

#[test]
fn corpus_file_to_tsv() {
    let dir = TempDir::new().expect("tempdir");
    let corpus = [
        speech("George", "Washington", "April", "30", "1789", "The government of the people"),
        speech("Abraham", "Lincoln", "March", "4", "1861", "The union, the people and the union!"),
    ]
    .join("\n");
    let corpus_path = write(&dir, "speeches.txt", &corpus);
    let output = dir.path().join("Speech_Inverted_Index.tsv");

    let pipeline = pipeline_in(&dir, IndexConfig::clean());
    let run = pipeline.run_path(&corpus_path);
    assert!(run.is_complete());
    assert_eq!(run.records.len(), 2);

    let outcome = pipeline.emit_to_path(&run, &output);
    assert!(outcome.is_success());
    assert_eq!(
        read_rows(&output),
        vec![
            ("government".to_string(), 1),
            ("people".to_string(), 2),
            ("union".to_string(), 2),
        ]
    );
    assert_eq!(outcome.rows_written, 3);
}

#[test]
fn several_speeches_on_one_line() {
    let dir = TempDir::new().expect("tempdir");
    let line = format!(
        "{}{}",
        speech("A", "One", "May", "1", "1900", "alpha beta"),
        speech("B", "Two", "June", "2", "1901", "beta gamma")
    );
    let pipeline = pipeline_in(&dir, IndexConfig::clean());

    let run = pipeline.run_str(&line);
    assert_eq!(run.records.len(), 2);
    assert_eq!(run.records[0].last_name, "One");
    assert_eq!(run.records[1].last_name, "Two");
    assert_eq!(run.term_frequency.get("beta"), 2);
    assert_eq!(run.records[0].frequency_of("gamma"), 0);
    assert_eq!(run.records[1].frequency_of("gamma"), 1);
}

#[test]
fn same_key_different_text_both_counted() {
    let dir = TempDir::new().expect("tempdir");
    let corpus = [
        speech("John", "Adams", "March", "4", "1797", "liberty"),
        speech("John", "Adams", "March", "4", "1797", "liberty and law"),
    ]
    .join("\n");
    let pipeline = pipeline_in(&dir, IndexConfig::clean());

    let run = pipeline.run_str(&corpus);
    assert_eq!(run.records.len(), 2);
    assert_eq!(run.records[0], run.records[1]);
    assert_eq!(run.records[0].key(), run.records[1].key());
    assert_eq!(run.term_frequency.get("liberty"), 2);
    assert_eq!(run.term_frequency.get("law"), 1);
}

#[test]
fn bad_dates_become_sentinel() {
    let dir = TempDir::new().expect("tempdir");
    let pipeline = pipeline_in(&dir, IndexConfig::default());

    let run = pipeline.run_str(&speech("X", "Y", "Z", "abc", "1987", "words"));
    assert_eq!(run.records.len(), 1);
    assert_eq!(run.records[0].day, SENTINEL);
    assert_eq!(run.records[0].year, 1987);
    assert_eq!(run.stats().malformed_dates, 1);
}

#[test]
fn truncated_record_is_dropped() {
    let dir = TempDir::new().expect("tempdir");
    let line = format!(
        "{}NEW ADDRESS=>FIRSTNAME=OnlyLASTNAME=Half",
        speech("A", "Whole", "May", "1", "1900", "complete text")
    );
    let pipeline = pipeline_in(&dir, IndexConfig::default());

    let run = pipeline.run_str(&line);
    assert_eq!(run.records.len(), 1);
    assert_eq!(run.records[0].last_name, "Whole");
    assert_eq!(run.parse_stats.truncated_strides, 1);
    assert!(run.is_complete());
}

#[test]
fn lines_without_markers_yield_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let pipeline = pipeline_in(&dir, IndexConfig::default());

    let run = pipeline.run_str("just some prose\n\nmore prose\n");
    assert!(run.records.is_empty());
    assert!(run.term_frequency.is_empty());
    assert_eq!(run.parse_stats.lines, 3);
}

#[test]
fn empty_token_kept_by_default() {
    let dir = TempDir::new().expect("tempdir");
    let pipeline = pipeline_in(&dir, IndexConfig::default());

    let run = pipeline.run_str(&speech("A", "B", "C", "1", "2", "the theater"));
    assert_eq!(run.term_frequency.get(""), 1);
    assert_eq!(run.term_frequency.get("theater"), 1);
    assert_eq!(run.entries()[0], TermEntry::new("", 1));
}

#[test]
fn missing_stop_words_is_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let err = Pipeline::from_stop_path(dir.path().join("nope.txt"), IndexConfig::default())
        .expect_err("missing stop list");
    assert!(matches!(err, IndexError::StopWords { .. }));
}

#[test]
fn missing_corpus_gives_empty_run_and_logs() {
    let dir = TempDir::new().expect("tempdir");
    let log_path = dir.path().join("ErrorLog.txt");
    let pipeline = pipeline_in(&dir, IndexConfig::default()).with_error_log(ErrorLog::to_path(&log_path));

    let run = pipeline.run_path(dir.path().join("absent.txt"));
    assert!(run.records.is_empty());
    assert!(run.is_partial());
    assert!(!run.is_complete());

    let log = fs::read_to_string(&log_path).expect("error log written");
    assert!(log.contains("failed to read corpus"));
}

/// Yields its inner bytes, then fails.
struct FailAfter<R> {
    inner: R,
}

impl<R: Read> Read for FailAfter<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::UnexpectedEof, "disk went away")),
            n => Ok(n),
        }
    }
}

#[test]
fn read_failure_keeps_parsed_speeches() {
    let dir = TempDir::new().expect("tempdir");
    let corpus = format!(
        "{}\n{}\n",
        speech("A", "One", "May", "1", "1900", "first"),
        speech("B", "Two", "May", "2", "1900", "second")
    );
    let reader = BufReader::new(FailAfter {
        inner: corpus.as_bytes(),
    });
    let pipeline = pipeline_in(&dir, IndexConfig::default());

    let run = pipeline.run_reader(reader);
    assert_eq!(run.records.len(), 2);
    assert!(run.is_partial());
    assert_eq!(run.term_frequency.get("second"), 1);
}

struct FullDisk {
    accepted: usize,
}

impl TermSink for FullDisk {
    fn accept(&mut self, _: &TermEntry) -> io::Result<()> {
        if self.accepted == 1 {
            return Err(io::Error::new(io::ErrorKind::Other, "no space left"));
        }
        self.accepted += 1;
        Ok(())
    }
}

#[test]
fn sink_failure_is_reported_and_logged() {
    let dir = TempDir::new().expect("tempdir");
    let log_path = dir.path().join("ErrorLog.txt");
    let pipeline = pipeline_in(&dir, IndexConfig::default()).with_error_log(ErrorLog::to_path(&log_path));
    let run = pipeline.run_str(&speech("A", "B", "C", "1", "2", "many different words"));

    let outcome = pipeline.emit(&run, &mut FullDisk { accepted: 0 });
    assert!(!outcome.is_success());
    assert!(matches!(outcome.error, Some(IndexError::Sink(_))));
    assert_eq!(outcome.rows_written, 1);
    assert!(fs::read_to_string(&log_path)
        .expect("log written")
        .contains("no space left"));
}

#[test]
fn output_into_missing_directory_fails_cleanly() {
    let dir = TempDir::new().expect("tempdir");
    let pipeline = pipeline_in(&dir, IndexConfig::default());
    let run = pipeline.run_str(&speech("A", "B", "C", "1", "2", "words"));

    let outcome = pipeline.emit_to_path(&run, dir.path().join("no/such/dir/out.tsv"));
    assert!(!outcome.is_success());
    assert_eq!(outcome.rows_written, 0);
}

#[test]
fn document_frequencies_per_speech() {
    let dir = TempDir::new().expect("tempdir");
    let corpus = [
        speech("A", "One", "May", "1", "1900", "war war peace"),
        speech("B", "Two", "June", "x", "1901", "peace"),
    ]
    .join("\n");
    let out = dir.path().join("docs.tsv");
    let pipeline = pipeline_in(&dir, IndexConfig::clean());
    let run = pipeline.run_str(&corpus);

    let outcome = pipeline.emit_documents_to_path(&run, &out);
    assert!(outcome.is_success());
    assert_eq!(outcome.rows_written, 3);

    let text = fs::read_to_string(&out).expect("doc output");
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "A\tOne\tMay\t1\t1900\tpeace\t1",
            "A\tOne\tMay\t1\t1900\twar\t2",
            "B\tTwo\tJune\t-1\t1901\tpeace\t1",
        ]
    );
}

#[test]
fn frequency_order_puts_common_terms_first() {
    let dir = TempDir::new().expect("tempdir");
    let pipeline = pipeline_in(
        &dir,
        IndexConfig {
            emit_order: EmitOrder::ByFrequency,
            ..IndexConfig::clean()
        },
    );
    let run = pipeline.run_str(&speech("A", "B", "C", "1", "2", "zeal zeal zeal apple apple mango"));

    let terms: Vec<_> = run.entries().into_iter().map(|e| e.term).collect();
    assert_eq!(terms, ["zeal", "apple", "mango"]);
}

#[test]
fn stop_list_from_words_matches_file() {
    let dir = TempDir::new().expect("tempdir");
    let from_file = pipeline_in(&dir, IndexConfig::clean());
    let from_words = Pipeline::new(
        StopWordSet::from_words(["the", "of", "and"]).expect("valid"),
        IndexConfig::clean(),
    );
    let corpus = speech("A", "B", "C", "1", "2", "the best of times and the worst");

    assert_eq!(
        from_file.run_str(&corpus).term_frequency,
        from_words.run_str(&corpus).term_frequency
    );
}
