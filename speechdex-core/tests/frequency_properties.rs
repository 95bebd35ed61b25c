//! Counting invariants over generated corpora.

use proptest::prelude::*;
use speechdex_core::{Accumulator, Analyzer, SpeechRecord, StopWordSet, TermFrequency};

fn analyzer() -> Analyzer {
    Analyzer::new(StopWordSet::from_words(["the", "a", "of"]).expect("valid stop words"))
}

fn speech_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("the".to_string()),
            Just("a".to_string()),
            Just("Union,".to_string()),
            Just("  ".to_string()),
            "[A-Za-z!.,']{1,8}",
        ],
        0..24,
    )
    .prop_map(|words| words.join(" "))
}

/// A corpus together with an arbitrary reordering of it.
fn corpus_and_permutation() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    prop::collection::vec(speech_text(), 0..12)
        .prop_flat_map(|texts| (Just(texts.clone()), Just(texts).prop_shuffle()))
}

fn records(texts: &[String]) -> Vec<SpeechRecord> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| SpeechRecord::new("F", format!("L{i}"), "May", 1, 1900).with_text(text.as_str()))
        .collect()
}

proptest! {
    #[test]
    fn global_equals_sum_of_speech_tables(texts in prop::collection::vec(speech_text(), 0..12)) {
        let analyzer = analyzer();
        let mut recs = records(&texts);
        let global = Accumulator::new(&analyzer).accumulate(&mut recs, TermFrequency::new());

        for (term, count) in global.iter() {
            let sum: u32 = recs.iter().map(|r| r.frequency_of(term)).sum();
            prop_assert_eq!(count, sum);
        }
        let per_speech: u64 = recs.iter().map(|r| r.token_count()).sum();
        prop_assert_eq!(global.total_tokens(), per_speech);
    }

    #[test]
    fn processing_order_does_not_matter((texts, shuffled) in corpus_and_permutation()) {
        let analyzer = analyzer();
        let acc = Accumulator::new(&analyzer);

        let mut in_order = records(&texts);
        let mut permuted = records(&shuffled);

        let a = acc.accumulate(&mut in_order, TermFrequency::new());
        let b = acc.accumulate(&mut permuted, TermFrequency::new());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn parallel_matches_sequential(texts in prop::collection::vec(speech_text(), 0..12)) {
        let analyzer = analyzer();
        let acc = Accumulator::new(&analyzer);

        let mut seq = records(&texts);
        let mut par = records(&texts);

        let a = acc.accumulate(&mut seq, TermFrequency::new());
        let b = acc
            .accumulate_parallel(&mut par, TermFrequency::new(), 2)
            .expect("pool starts");
        prop_assert_eq!(a, b);
    }

    #[test]
    fn tokens_never_contain_stop_words_or_junk(text in speech_text()) {
        let analyzer = analyzer();
        for token in analyzer.tokens(&text) {
            prop_assert!(!analyzer.stop_words().contains(&token));
            prop_assert!(!token.contains(' '));
            prop_assert!(!token.chars().any(|c| c.is_ascii_uppercase()));
            prop_assert!(!token.contains(|c: char| "!.,'".contains(c)));
        }
    }
}
