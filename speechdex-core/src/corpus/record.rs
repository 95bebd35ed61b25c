//! Parsed speech records.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use rustc_hash::FxHashMap;
use speechdex_types::{Frequency, RecordParseError, SENTINEL};

use super::{FIELD_MARKERS, RECORD_START};

/// Parses a day or year field.
///
/// Surrounding whitespace and a leading sign are accepted; anything else
/// that is not an `i32` yields `None`.
#[inline]
pub(crate) fn parse_date_field(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

/// Identity of a speech: who delivered it and when.
///
/// Text and links are not part of the key, so two records with the same
/// speaker and date compare equal even when their contents differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeechKey {
    /// Speaker's first name.
    pub first_name: String,
    /// Speaker's last name.
    pub last_name: String,
    /// Month label as it appears in the corpus.
    pub month: String,
    /// Day of month, or [`SENTINEL`].
    pub day: i32,
    /// Year, or [`SENTINEL`].
    pub year: i32,
}

/// One speech parsed from the corpus.
///
/// Besides its fields, a record owns the term frequencies of its own text.
/// The table is empty until the record passes through the accumulator and
/// is only ever written by it.
#[derive(Debug, Clone, Default)]
pub struct SpeechRecord {
    /// Speaker's first name.
    pub first_name: String,
    /// Speaker's last name.
    pub last_name: String,
    /// Month label. Not validated against a calendar.
    pub month: String,
    /// Day of month, or [`SENTINEL`] when the field did not parse.
    pub day: i32,
    /// Year, or [`SENTINEL`] when the field did not parse.
    pub year: i32,
    /// Address of the speech on the web.
    pub web_link: String,
    /// Location of the speech's own file.
    pub file_link: String,
    /// Raw speech text.
    pub text: String,
    term_frequency: FxHashMap<String, Frequency>,
}

impl SpeechRecord {
    /// Creates a record with the given speaker and date and no content.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        month: impl Into<String>,
        day: i32,
        year: i32,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            month: month.into(),
            day,
            year,
            ..Self::default()
        }
    }

    /// Sets the web and file links.
    pub fn with_links(mut self, web_link: impl Into<String>, file_link: impl Into<String>) -> Self {
        self.web_link = web_link.into();
        self.file_link = file_link.into();
        self
    }

    /// Sets the speech text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Returns the identity of this speech.
    pub fn key(&self) -> SpeechKey {
        SpeechKey {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            month: self.month.clone(),
            day: self.day,
            year: self.year,
        }
    }

    /// Returns `true` if the day or year was replaced by [`SENTINEL`].
    #[inline]
    pub fn has_sentinel_date(&self) -> bool {
        self.day == SENTINEL || self.year == SENTINEL
    }

    /// Per-speech term frequencies.
    #[inline]
    pub fn term_frequency(&self) -> &FxHashMap<String, Frequency> {
        &self.term_frequency
    }

    /// Occurrences of `term` in this speech.
    #[inline]
    pub fn frequency_of(&self, term: &str) -> Frequency {
        self.term_frequency.get(term).copied().unwrap_or(0)
    }

    /// Total tokens counted for this speech.
    pub fn token_count(&self) -> u64 {
        self.term_frequency.values().map(|&c| c as u64).sum()
    }

    /// Borrows the text and the term table at the same time, so the text
    /// can be analyzed straight into the table.
    #[inline]
    pub(crate) fn text_and_frequency_mut(&mut self) -> (&str, &mut FxHashMap<String, Frequency>) {
        (&self.text, &mut self.term_frequency)
    }
}

/// Increments `term` in `counts`, allocating the key only on first sight.
#[inline]
pub(crate) fn bump(counts: &mut FxHashMap<String, Frequency>, term: &str) {
    if let Some(count) = counts.get_mut(term) {
        *count += 1;
    } else {
        counts.insert(term.to_owned(), 1);
    }
}

impl PartialEq for SpeechRecord {
    fn eq(&self, other: &Self) -> bool {
        self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.month == other.month
            && self.day == other.day
            && self.year == other.year
    }
}

impl Eq for SpeechRecord {}

impl Hash for SpeechRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with `SpeechKey`'s derived Hash.
        self.first_name.hash(state);
        self.last_name.hash(state);
        self.month.hash(state);
        self.day.hash(state);
        self.year.hash(state);
    }
}

/// Renders the record in corpus format, record-start marker included.
impl fmt::Display for SpeechRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{RECORD_START}FIRSTNAME={}LASTNAME={}MONTH={}DAY={}YEAR={}WEBLINK={}FILELINK={}SPEECH={}",
            self.first_name,
            self.last_name,
            self.month,
            self.day,
            self.year,
            self.web_link,
            self.file_link,
            self.text
        )
    }
}

/// Strictly parses a single record.
///
/// Unlike the corpus parser, a non-numeric day or year is an error here
/// rather than a sentinel. The leading [`RECORD_START`] marker is optional.
impl FromStr for SpeechRecord {
    type Err = RecordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s.strip_prefix(RECORD_START).unwrap_or(s);
        let mut values = [""; FIELD_MARKERS.len()];

        for (i, &marker) in FIELD_MARKERS.iter().enumerate() {
            let at = rest
                .find(marker)
                .ok_or(RecordParseError::MissingField(marker))?;
            if i > 0 {
                values[i - 1] = &rest[..at];
            }
            rest = &rest[at + marker.len()..];
        }
        values[FIELD_MARKERS.len() - 1] = rest;

        let [first, last, month, day, year, web, file, text] = values;
        let day = parse_date_field(day).ok_or_else(|| RecordParseError::InvalidDay(day.into()))?;
        let year =
            parse_date_field(year).ok_or_else(|| RecordParseError::InvalidYear(year.into()))?;

        Ok(Self::new(first, last, month, day, year)
            .with_links(web, file)
            .with_text(text))
    }
}
