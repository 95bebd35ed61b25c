//! Text analysis pipeline.
//!
//! Turns one speech's raw text into its token sequence:
//! - **Normalizer**: lower-cases and strips junk punctuation
//! - **Stop words**: removes whole-word stop words
//! - **Collapse**: squeezes runs of spaces left behind
//! - **Tokenizer**: splits on single spaces
//!
//! Each stage is exposed on its own; [`Analyzer`] runs them in order.

pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;

pub use normalizer::TextNormalizer;
pub use stopwords::StopWordSet;
pub use tokenizer::Tokenizer;

use normalizer::collapse_spaces_into;

/// Full text analysis for one document at a time.
///
/// Holds only immutable state, so a single analyzer can be shared by
/// reference across worker threads.
#[derive(Debug, Clone)]
pub struct Analyzer {
    normalizer: TextNormalizer,
    stop_words: StopWordSet,
    tokenizer: Tokenizer,
}

impl Analyzer {
    /// Creates an analyzer that emits empty tokens.
    pub fn new(stop_words: StopWordSet) -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            stop_words,
            tokenizer: Tokenizer::new(),
        }
    }

    /// Sets whether empty tokens are emitted.
    pub fn keep_empty_tokens(mut self, keep: bool) -> Self {
        self.tokenizer = if keep {
            Tokenizer::new()
        } else {
            Tokenizer::skipping_empty()
        };
        self
    }

    /// The stop words in use.
    #[inline]
    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    /// Writes the fully normalized text (ready to tokenize) into `out`.
    ///
    /// `scratch` holds the intermediate junk-stripped text; both buffers are
    /// cleared first and can be reused across calls.
    pub fn normalize_into(&self, text: &str, scratch: &mut String, out: &mut String) {
        self.normalizer.normalize_into(text, scratch);
        let without_stops = self.stop_words.remove_from(scratch);
        collapse_spaces_into(&without_stops, out);
    }

    /// Returns the fully normalized text.
    pub fn normalize(&self, text: &str) -> String {
        let mut scratch = String::with_capacity(text.len());
        let mut out = String::with_capacity(text.len());
        self.normalize_into(text, &mut scratch, &mut out);
        out
    }

    /// Analyzes `text` and emits each token in order.
    pub fn analyze<F>(&self, text: &str, emit: F)
    where
        F: FnMut(&str),
    {
        let normalized = self.normalize(text);
        self.tokenizer.tokenize(&normalized, emit);
    }

    /// Like [`analyze`](Self::analyze), reusing caller-owned buffers.
    pub fn analyze_with<F>(&self, text: &str, scratch: &mut String, out: &mut String, emit: F)
    where
        F: FnMut(&str),
    {
        self.normalize_into(text, scratch, out);
        self.tokenizer.tokenize(out, emit);
    }

    /// Analyzes `text` and collects the owned tokens.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        self.analyze(text, |t| out.push(t.to_owned()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer(stops: &[&str]) -> Analyzer {
        Analyzer::new(StopWordSet::from_words(stops).expect("valid stop words"))
    }

    #[test]
    fn junk_stripping_before_stop_words() {
        let a = analyzer(&[]);
        assert_eq!(a.normalize("Hello, World!!"), "hello world");
    }

    #[test]
    fn stop_word_leaves_leading_empty_token() {
        let a = analyzer(&["the"]);
        assert_eq!(a.tokens("the theater"), ["", "theater"]);
    }

    #[test]
    fn stop_words_match_after_lowercasing() {
        let a = analyzer(&["the", "of"]);
        assert_eq!(a.tokens("THE State OF the Union"), ["", "state", "union"]);
    }

    #[test]
    fn punctuation_is_gone_before_stop_matching() {
        let a = analyzer(&["nations"]);
        // "nation's" becomes "nations" and is then a stop word.
        assert_eq!(a.tokens("nation's strength"), ["", "strength"]);
    }

    #[test]
    fn gaps_collapse_to_single_separator() {
        let a = analyzer(&["and", "the"]);
        assert_eq!(a.normalize("peace and the war"), "peace war");
        assert_eq!(a.tokens("peace and the war"), ["peace", "war"]);
    }

    #[test]
    fn trailing_stop_word_yields_trailing_empty_token() {
        let a = analyzer(&["us"]);
        assert_eq!(a.tokens("unite us"), ["unite", ""]);
    }

    #[test]
    fn empty_text_is_one_empty_token() {
        let a = analyzer(&["x"]);
        assert_eq!(a.tokens(""), [""]);
    }

    #[test]
    fn dropping_empty_tokens() {
        let a = analyzer(&["the"]).keep_empty_tokens(false);
        assert_eq!(a.tokens("the theater"), ["theater"]);
        assert!(a.tokens("").is_empty());
    }

    #[test]
    fn renormalizing_is_stable() {
        let a = analyzer(&["a", "the", "of", "and"]);
        for text in [
            "The Congress of the United States and a People.",
            "the theater",
            "  Spaces,  everywhere ; and the end",
        ] {
            let once = a.normalize(text);
            assert_eq!(a.normalize(&once), once);
            assert_eq!(a.tokens(&once), a.tokens(text));
        }
    }

    #[test]
    fn buffers_are_reusable() {
        let a = analyzer(&["the"]);
        let mut scratch = String::new();
        let mut out = String::new();

        a.normalize_into("The End.", &mut scratch, &mut out);
        assert_eq!(out, " end");
        a.normalize_into("Fin", &mut scratch, &mut out);
        assert_eq!(out, "fin");
    }
}
