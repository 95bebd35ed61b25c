//! Single-space tokenizer.
//!
//! Splits analyzed text on every U+0020 byte. Unlike a typical word
//! splitter it does not skip empty segments: `" theater"` yields `""` and
//! `"theater"`, and an empty input yields one empty token. Empty tokens are
//! counted like any other term unless the tokenizer is told to drop them.

use core::str;
use memchr::memchr_iter;

/// Streaming tokenizer that emits slices of its input.
///
/// # Example
///
/// ```
/// use speechdex_core::analyzer::tokenizer::Tokenizer;
///
/// let mut tokens = Vec::new();
/// Tokenizer::new().tokenize(" state union", |t| tokens.push(t));
/// assert_eq!(tokens, ["", "state", "union"]);
/// ```
#[derive(Debug, Copy, Clone, Default)]
pub struct Tokenizer {
    skip_empty: bool,
}

impl Tokenizer {
    /// Creates a tokenizer that emits empty tokens.
    #[inline]
    pub const fn new() -> Self {
        Self { skip_empty: false }
    }

    /// Creates a tokenizer that drops empty tokens.
    #[inline]
    pub const fn skipping_empty() -> Self {
        Self { skip_empty: true }
    }

    /// Returns `true` if empty tokens are dropped.
    #[inline]
    pub const fn skips_empty(&self) -> bool {
        self.skip_empty
    }

    /// Splits `text` on spaces and emits each segment in order.
    #[inline]
    pub fn tokenize<'t, F>(&self, text: &'t str, mut emit: F)
    where
        F: FnMut(&'t str),
    {
        let bytes = text.as_bytes();
        let mut start = 0usize;

        for i in memchr_iter(b' ', bytes) {
            self.emit_segment(bytes, start, i, &mut emit);
            start = i + 1;
        }
        self.emit_segment(bytes, start, bytes.len(), &mut emit);
    }

    #[inline(always)]
    fn emit_segment<'t, F>(&self, bytes: &'t [u8], start: usize, end: usize, emit: &mut F)
    where
        F: FnMut(&'t str),
    {
        if self.skip_empty && start == end {
            return;
        }
        // SAFETY: `bytes` comes from a `&str` and is only cut next to ASCII
        // space bytes, which are never part of a multi-byte sequence.
        let token = unsafe { str::from_utf8_unchecked(&bytes[start..end]) };
        emit(token);
    }

    /// Collects tokens into a vector.
    pub fn tokens<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut out = Vec::new();
        self.tokenize(text, |t| out.push(t));
        out
    }
}
