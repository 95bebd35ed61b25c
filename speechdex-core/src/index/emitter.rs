//! Frequency table emission.
//!
//! [`emit`] turns a [`TermFrequency`] into ordered [`TermEntry`] rows;
//! [`write_table`] pushes rows into any [`TermSink`]. The reference sink,
//! [`TsvSink`], writes one `term\tcount` line per row with no header and no
//! trailing summary.

use std::io::{self, BufWriter, Write};

use speechdex_types::{EmitOrder, IndexError, TermEntry};

use crate::corpus::SpeechRecord;
use crate::index::types::TermFrequency;

/// Destination for emitted `(term, frequency)` rows.
pub trait TermSink {
    /// Accepts the next row.
    fn accept(&mut self, entry: &TermEntry) -> io::Result<()>;

    /// Called once after the last row.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl TermSink for Vec<TermEntry> {
    fn accept(&mut self, entry: &TermEntry) -> io::Result<()> {
        self.push(entry.clone());
        Ok(())
    }
}

/// Writes rows as tab-separated lines.
pub struct TsvSink<W: Write> {
    out: BufWriter<W>,
}

impl<W: Write> TsvSink<W> {
    /// Wraps a writer.
    pub fn new(inner: W) -> Self {
        Self {
            out: BufWriter::new(inner),
        }
    }

    /// Flushes and returns the inner writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.out.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> TermSink for TsvSink<W> {
    fn accept(&mut self, entry: &TermEntry) -> io::Result<()> {
        writeln!(self.out, "{entry}")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Sorts rows in place according to `order`.
pub fn sort_entries(entries: &mut [TermEntry], order: EmitOrder) {
    match order {
        EmitOrder::Lexicographic => entries.sort_unstable(),
        EmitOrder::ByFrequency => entries.sort_unstable_by(TermEntry::cmp_by_frequency),
        EmitOrder::Unordered => {}
    }
}

/// Converts the global table into rows in the requested order.
pub fn emit(table: &TermFrequency, order: EmitOrder) -> Vec<TermEntry> {
    let mut entries: Vec<TermEntry> = table
        .iter()
        .map(|(term, count)| TermEntry::new(term, count))
        .collect();
    sort_entries(&mut entries, order);
    entries
}

/// Writes every row to `sink` and finishes it. Returns the rows written.
///
/// # Errors
///
/// Returns [`IndexError::Sink`] on the first failed write.
pub fn write_table<S: TermSink + ?Sized>(
    entries: &[TermEntry],
    sink: &mut S,
) -> Result<usize, IndexError> {
    let mut rows = 0;
    write_table_counted(entries, sink, &mut rows)?;
    Ok(rows)
}

/// Like [`write_table`], but `rows` holds the accepted count even when a
/// write fails.
pub(crate) fn write_table_counted<S: TermSink + ?Sized>(
    entries: &[TermEntry],
    sink: &mut S,
    rows: &mut usize,
) -> Result<(), IndexError> {
    for entry in entries {
        sink.accept(entry).map_err(IndexError::Sink)?;
        *rows += 1;
    }
    sink.finish().map_err(IndexError::Sink)
}

/// Writes each speech's own term table as
/// `first\tlast\tmonth\tday\tyear\tterm\tcount` lines, speeches in corpus
/// order and terms in `order`. Returns the rows written.
///
/// # Errors
///
/// Returns [`IndexError::Sink`] on the first failed write.
pub fn write_document_frequencies<W: Write>(
    records: &[SpeechRecord],
    order: EmitOrder,
    out: W,
) -> Result<usize, IndexError> {
    let mut rows = 0;
    write_document_frequencies_counted(records, order, out, &mut rows)?;
    Ok(rows)
}

pub(crate) fn write_document_frequencies_counted<W: Write>(
    records: &[SpeechRecord],
    order: EmitOrder,
    out: W,
    rows: &mut usize,
) -> Result<(), IndexError> {
    let mut out = BufWriter::new(out);
    let mut entries = Vec::new();

    for record in records {
        entries.clear();
        entries.extend(
            record
                .term_frequency()
                .iter()
                .map(|(term, &count)| TermEntry::new(term.as_str(), count)),
        );
        sort_entries(&mut entries, order);

        for entry in &entries {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t{}",
                record.first_name, record.last_name, record.month, record.day, record.year, entry
            )
            .map_err(IndexError::Sink)?;
            *rows += 1;
        }
    }

    out.flush().map_err(IndexError::Sink)
}
