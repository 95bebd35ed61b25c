//! Speech corpus ingestion.
//!
//! A corpus is a flat text file of speech records. Each record starts with
//! [`RECORD_START`] and carries its fields as `MARKER=value` runs with no
//! separators between them:
//!
//! ```text
//! NEW ADDRESS=>FIRSTNAME=GeorgeLASTNAME=WashingtonMONTH=JanuaryDAY=8YEAR=1790WEBLINK=...FILELINK=...SPEECH=...
//! ```
//!
//! Several records may share one line. Markers are matched literally and
//! there is no escaping: a value that contains a marker string corrupts
//! every field after it. This is a property of the file format.

pub mod parser;
pub mod record;

pub use parser::{CorpusParser, MarkerSplitter, ParseStats, ParsedCorpus};
pub use record::{SpeechKey, SpeechRecord};

/// Marks the start of every record.
pub const RECORD_START: &str = "NEW ADDRESS=>";

/// Field markers in the order their values appear within a record.
pub const FIELD_MARKERS: [&str; 8] = [
    "FIRSTNAME=",
    "LASTNAME=",
    "MONTH=",
    "DAY=",
    "YEAR=",
    "WEBLINK=",
    "FILELINK=",
    "SPEECH=",
];

/// Every marker the parser splits on. Earlier entries take precedence when
/// two markers begin at the same offset.
pub const MARKERS: [&str; 9] = [
    RECORD_START,
    FIELD_MARKERS[0],
    FIELD_MARKERS[1],
    FIELD_MARKERS[2],
    FIELD_MARKERS[3],
    FIELD_MARKERS[4],
    FIELD_MARKERS[5],
    FIELD_MARKERS[6],
    FIELD_MARKERS[7],
];

/// Number of split segments that make up one record: the segment between
/// [`RECORD_START`] and the first field marker, then one per field.
pub const RECORD_STRIDE: usize = MARKERS.len();
