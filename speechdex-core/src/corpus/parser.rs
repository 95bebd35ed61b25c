//! Corpus parser.
//!
//! Splits each input line on every marker in [`MARKERS`] and walks the
//! resulting segments in fixed strides of [`RECORD_STRIDE`]:
//!
//! ```text
//! segments: [prefix][gap][first][last][month][day][year][web][file][text][gap][first]...
//!            ^       ^---------------------- record 0 ------------------^ ^-- record 1
//!            discarded
//! ```
//!
//! A trailing stride with fewer than [`RECORD_STRIDE`] segments is dropped.
//! Day and year fields that do not parse become [`SENTINEL`]. Neither case
//! stops the parser; both are counted in [`ParseStats`].
//!
//! A read failure on the source ends parsing early. The records parsed up
//! to that point are still returned alongside the error.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use memchr::memmem::Finder;
use smallvec::SmallVec;
use speechdex_types::{IndexError, SENTINEL};
use tracing::{debug, error, info};

use super::record::{parse_date_field, SpeechRecord};
use super::{MARKERS, RECORD_STRIDE};

/// Segments of one split line. A line usually holds a single record
/// (prefix plus one stride), which stays inline.
pub type Segments<'a> = SmallVec<[&'a str; RECORD_STRIDE + 1]>;

/// Splits text on every corpus marker.
///
/// Behaves like splitting on a list of separators where, at any offset, the
/// first marker in [`MARKERS`] that matches wins and scanning resumes after
/// it. `n` marker occurrences always produce `n + 1` segments, empty ones
/// included.
pub struct MarkerSplitter {
    finders: [Finder<'static>; RECORD_STRIDE],
}

impl Default for MarkerSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerSplitter {
    /// Builds substring finders for every marker.
    pub fn new() -> Self {
        Self {
            finders: MARKERS.map(|marker| Finder::new(marker)),
        }
    }

    /// Splits `line` into segments.
    pub fn split<'a>(&self, line: &'a str) -> Segments<'a> {
        let bytes = line.as_bytes();
        let mut segments = Segments::new();

        // Next known occurrence of each marker at or after `pos`.
        let mut next: [Option<usize>; RECORD_STRIDE] = [None; RECORD_STRIDE];
        for (slot, finder) in next.iter_mut().zip(&self.finders) {
            *slot = finder.find(bytes);
        }

        let mut pos = 0usize;
        loop {
            let mut best: Option<(usize, usize)> = None;

            for (k, finder) in self.finders.iter().enumerate() {
                if let Some(at) = next[k] {
                    if at < pos {
                        next[k] = finder.find(&bytes[pos..]).map(|i| i + pos);
                    }
                }
                if let Some(at) = next[k] {
                    if best.map_or(true, |(b, _)| at < b) {
                        best = Some((at, k));
                    }
                }
            }

            match best {
                Some((at, k)) => {
                    // Markers are ASCII, so `at` and `at + len` are char boundaries.
                    segments.push(&line[pos..at]);
                    pos = at + MARKERS[k].len();
                }
                None => {
                    segments.push(&line[pos..]);
                    return segments;
                }
            }
        }
    }
}

/// Counters collected while parsing a corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines read from the source.
    pub lines: usize,
    /// Records produced.
    pub records: usize,
    /// Records whose day or year was replaced by the sentinel.
    pub malformed_dates: usize,
    /// Incomplete trailing strides that were dropped.
    pub truncated_strides: usize,
}

/// Output of one parse: the records in source order plus diagnostics.
#[derive(Debug, Default)]
pub struct ParsedCorpus {
    /// Records in the order they appear in the source.
    pub records: Vec<SpeechRecord>,
    /// Parse counters.
    pub stats: ParseStats,
    /// Set when the source failed before it was fully read.
    pub error: Option<IndexError>,
}

impl ParsedCorpus {
    /// Returns `true` if the whole source was read.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Line-oriented speech corpus parser.
#[derive(Default)]
pub struct CorpusParser {
    splitter: MarkerSplitter,
}

impl CorpusParser {
    /// Creates a parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses every record on one line, appending them to `out`.
    pub fn parse_line(&self, line: &str, out: &mut Vec<SpeechRecord>, stats: &mut ParseStats) {
        let segments = self.splitter.split(line);
        stats.lines += 1;

        let mut i = 1usize;
        while i < segments.len() {
            let Some(stride) = segments.get(i..i + RECORD_STRIDE) else {
                stats.truncated_strides += 1;
                debug!(
                    target: "speechdex::parse",
                    line = stats.lines,
                    segments = segments.len() - i,
                    "dropping incomplete record"
                );
                break;
            };

            let day = parse_date_field(stride[4]).unwrap_or(SENTINEL);
            let year = parse_date_field(stride[5]).unwrap_or(SENTINEL);

            let record = SpeechRecord::new(stride[1], stride[2], stride[3], day, year)
                .with_links(stride[6], stride[7])
                .with_text(stride[8]);

            if record.has_sentinel_date() {
                stats.malformed_dates += 1;
                debug!(
                    target: "speechdex::parse",
                    line = stats.lines,
                    day = stride[4],
                    year = stride[5],
                    "unparseable date field, using sentinel"
                );
            }

            out.push(record);
            stats.records += 1;
            i += RECORD_STRIDE;
        }
    }

    /// Parses an in-memory corpus.
    pub fn parse_str(&self, text: &str) -> ParsedCorpus {
        let mut corpus = ParsedCorpus::default();
        for line in text.lines() {
            self.parse_line(line, &mut corpus.records, &mut corpus.stats);
        }
        corpus
    }

    /// Parses a corpus from a buffered reader.
    ///
    /// Lines are decoded leniently: bytes that are not valid UTF-8 become
    /// U+FFFD and parsing carries on. Only an I/O error from the reader ends
    /// parsing early, in which case the records parsed so far are kept and
    /// the error is stored on the result.
    pub fn parse_reader<R: BufRead>(&self, mut reader: R) -> ParsedCorpus {
        let mut corpus = ParsedCorpus::default();
        let mut buf = Vec::with_capacity(4096);

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = decode_line(&buf);
                    if matches!(line, Cow::Owned(_)) {
                        debug!(
                            target: "speechdex::parse",
                            line = corpus.stats.lines + 1,
                            "invalid UTF-8 replaced"
                        );
                    }
                    self.parse_line(&line, &mut corpus.records, &mut corpus.stats);
                }
                Err(source) => {
                    error!(
                        target: "speechdex::parse",
                        records = corpus.records.len(),
                        error = %source,
                        "corpus read failed, keeping partial result"
                    );
                    corpus.error = Some(IndexError::CorpusRead {
                        records: corpus.records.len(),
                        source,
                    });
                    break;
                }
            }
        }

        info!(
            target: "speechdex::parse",
            lines = corpus.stats.lines,
            records = corpus.stats.records,
            malformed_dates = corpus.stats.malformed_dates,
            truncated = corpus.stats.truncated_strides,
            "corpus parsed"
        );
        corpus
    }

    /// Parses a corpus file.
    ///
    /// A file that cannot be opened yields an empty corpus carrying the error.
    pub fn parse_path(&self, path: impl AsRef<Path>) -> ParsedCorpus {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => self.parse_reader(BufReader::new(file)),
            Err(source) => {
                error!(
                    target: "speechdex::parse",
                    path = %path.display(),
                    error = %source,
                    "cannot open corpus"
                );
                ParsedCorpus {
                    error: Some(IndexError::CorpusRead { records: 0, source }),
                    ..ParsedCorpus::default()
                }
            }
        }
    }
}

/// Strips one trailing `\n` or `\r\n` and decodes the rest, replacing
/// invalid UTF-8 with U+FFFD.
pub(crate) fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}

/// Reads a corpus file with a default parser.
pub fn load_corpus(path: impl AsRef<Path>) -> ParsedCorpus {
    CorpusParser::new().parse_path(path)
}
