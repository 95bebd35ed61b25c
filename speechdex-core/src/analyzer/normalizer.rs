//! Character-level text cleanup.
//!
//! Two passes bracket stop-word removal in the analysis pipeline:
//!
//! 1. [`TextNormalizer::normalize_into`] lower-cases the text and drops
//!    every character in [`JUNK_CHARS`].
//! 2. [`collapse_spaces_into`] turns every run of two or more spaces into a
//!    single space, once stop words have left their gaps behind.
//!
//! Neither pass trims the ends of the text, and only U+0020 counts as a
//! space when collapsing. Tabs and other whitespace pass through untouched.

/// Punctuation removed from speech text. Everything else, including digits,
/// `-` and all non-ASCII characters, is kept.
pub const JUNK_CHARS: [u8; 31] = [
    b'`', b'~', b'!', b'@', b'#', b'$', b'%', b'^', b'&', b'*', b'(', b')', b'_', b'=', b'+',
    b'[', b']', b'{', b'}', b'\\', b'|', b'\'', b'"', b';', b':', b',', b'<', b'.', b'>', b'/',
    b'?',
];

/// Marks a dropped byte in [`ASCII_FOLD`].
const DROP: u8 = 0xFF;

/// ASCII byte -> lower-cased byte, or [`DROP`] for junk characters.
const ASCII_FOLD: [u8; 128] = build_fold_table();

const fn build_fold_table() -> [u8; 128] {
    let mut table = [0u8; 128];
    let mut b = 0;
    while b < 128 {
        table[b] = (b as u8).to_ascii_lowercase();
        b += 1;
    }
    let mut j = 0;
    while j < JUNK_CHARS.len() {
        table[JUNK_CHARS[j] as usize] = DROP;
        j += 1;
    }
    table
}

/// Returns `true` if `c` is removed by the normalizer.
#[inline(always)]
pub fn is_junk(c: char) -> bool {
    c.is_ascii() && ASCII_FOLD[c as usize] == DROP
}

/// Lower-cases text and strips junk punctuation.
///
/// # Examples
///
/// ```
/// use speechdex_core::analyzer::normalizer::TextNormalizer;
///
/// let normalizer = TextNormalizer::new();
/// assert_eq!(normalizer.normalize("Hello, World!!"), "hello world");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Creates a normalizer.
    pub const fn new() -> Self {
        Self
    }

    /// Normalizes `input` into `out`, clearing it first and reusing its
    /// capacity.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let bytes = input.as_bytes();
        let mut i = 0usize;

        while i < bytes.len() {
            let b = bytes[i];
            if b < 128 {
                let folded = ASCII_FOLD[b as usize];
                if folded != DROP {
                    out.push(folded as char);
                }
                i += 1;
                continue;
            }

            // Non-ASCII run: lower-case per char. A lowered char may itself
            // be ASCII (KELVIN SIGN -> 'k'), so junk is checked after folding.
            let run_end = bytes[i..]
                .iter()
                .position(|&b| b < 128)
                .map_or(bytes.len(), |p| i + p);
            for ch in input[i..run_end].chars() {
                for lowered in ch.to_lowercase() {
                    if !is_junk(lowered) {
                        out.push(lowered);
                    }
                }
            }
            i = run_end;
        }
    }

    /// Normalizes text and returns a new `String`.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }
}

/// Collapses runs of two or more spaces in `input` into one, writing to
/// `out` after clearing it.
pub fn collapse_spaces_into(input: &str, out: &mut String) {
    out.clear();
    out.reserve(input.len());

    let mut prev_space = false;
    for ch in input.chars() {
        if ch == ' ' {
            if prev_space {
                continue;
            }
            prev_space = true;
        } else {
            prev_space = false;
        }
        out.push(ch);
    }
}

/// Collapses space runs and returns a new `String`.
#[inline]
pub fn collapse_spaces(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    collapse_spaces_into(input, &mut out);
    out
}
