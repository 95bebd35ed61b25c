//! Stop-word list and whole-word removal.
//!
//! Stop words are removed from the normalized text before tokenizing, by
//! replacing each whole-word occurrence with the empty string. The spaces
//! around a removed word stay behind; space collapsing and tokenizing deal
//! with them afterwards.
//!
//! Whole-word means `\b` on both sides, so `the` is removed from
//! `"the theater"` but not from inside `"theater"`.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;
use rustc_hash::FxHashSet;
use speechdex_types::IndexError;
use tracing::debug;

use crate::corpus::parser::decode_line;

/// Immutable set of stop words with a compiled removal pattern.
///
/// Entries are trimmed and blank entries are dropped rather than stored
/// verbatim, so a padded line such as `"and "` still removes `and` and a
/// blank line never becomes a stop word.
///
/// Safe to share between threads once built.
#[derive(Debug, Clone, Default)]
pub struct StopWordSet {
    words: FxHashSet<String>,
    pattern: Option<Regex>,
}

impl StopWordSet {
    /// A set with no stop words. Removal is a no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a set from words. Surrounding whitespace is trimmed and blank
    /// entries are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::StopPattern`] if the combined pattern exceeds
    /// the regex engine's size limits.
    pub fn from_words<I, S>(words: I) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: FxHashSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_owned())
            .filter(|w| !w.is_empty())
            .collect();

        let pattern = if words.is_empty() {
            None
        } else {
            Some(compile(&words).map_err(|e| IndexError::StopPattern(e.to_string()))?)
        };

        Ok(Self { words, pattern })
    }

    /// Reads one stop word per line.
    ///
    /// Lines are decoded leniently, like corpus lines: invalid UTF-8 becomes
    /// U+FFFD instead of failing the whole list.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::StopWords`] if the reader fails; `origin` names
    /// the source in the error.
    pub fn from_reader<R: BufRead>(mut reader: R, origin: &Path) -> Result<Self, IndexError> {
        let mut lines = Vec::new();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| IndexError::StopWords {
                    path: origin.to_path_buf(),
                    source,
                })?;
            if n == 0 {
                break;
            }
            lines.push(decode_line(&buf).into_owned());
        }
        let set = Self::from_words(lines)?;
        debug!(
            target: "speechdex::analyze",
            words = set.len(),
            origin = %origin.display(),
            "stop words loaded"
        );
        Ok(set)
    }

    /// Reads a stop-word file.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::StopWords`] if the file cannot be opened or read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| IndexError::StopWords {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Returns `true` if `word` is a stop word.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stop words.
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set has no stop words.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Replaces every whole-word occurrence of a stop word with `""`.
    ///
    /// Borrows the input when nothing matched.
    pub fn remove_from<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match &self.pattern {
            Some(re) => re.replace_all(text, ""),
            None => Cow::Borrowed(text),
        }
    }
}

/// Compiles all words into one `\b(?:w1|w2|...)\b` alternation.
///
/// Longer words come first so a stop word that prefixes another (`new`,
/// `new york`) never shadows it. A removed match is bounded by non-word
/// characters on both sides, so one pass leaves the same text as removing
/// single-token words one at a time.
fn compile(words: &FxHashSet<String>) -> Result<Regex, regex::Error> {
    let mut sorted: Vec<&str> = words.iter().map(String::as_str).collect();
    sorted.sort_unstable_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let alternation = sorted
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{alternation})\b"))
}
