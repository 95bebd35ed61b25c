//! Corpus-wide term frequency table.

use rustc_hash::FxHashMap;
use speechdex_types::Frequency;

/// Term -> occurrence count across every speech in one run.
///
/// Built fresh for each run and passed explicitly through the pipeline.
/// Counts only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermFrequency {
    pub(crate) counts: FxHashMap<String, Frequency>,
    pub(crate) total: u64,
}

impl TermFrequency {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with room for `terms` distinct terms.
    pub fn with_capacity(terms: usize) -> Self {
        Self {
            counts: FxHashMap::with_capacity_and_hasher(terms, Default::default()),
            total: 0,
        }
    }

    /// Counts one occurrence of `term`.
    #[inline]
    pub fn increment(&mut self, term: &str) {
        self.add(term, 1);
    }

    /// Counts `n` occurrences of `term`.
    #[inline]
    pub fn add(&mut self, term: &str, n: Frequency) {
        if let Some(count) = self.counts.get_mut(term) {
            *count += n;
        } else {
            self.counts.insert(term.to_owned(), n);
        }
        self.total += n as u64;
    }

    /// Adds every count from another term table.
    pub fn merge_counts<'a, I>(&mut self, counts: I)
    where
        I: IntoIterator<Item = (&'a String, &'a Frequency)>,
    {
        for (term, &n) in counts {
            self.add(term, n);
        }
    }

    /// Count for `term`, or 0.
    #[inline]
    #[must_use]
    pub fn get(&self, term: &str) -> Frequency {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Returns `true` if `term` has been counted.
    #[inline]
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.counts.contains_key(term)
    }

    /// Number of distinct terms.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no term has been counted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    #[inline]
    #[must_use]
    pub fn total_tokens(&self) -> u64 {
        self.total
    }

    /// Iterates over `(term, count)` in map order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Frequency)> + '_ {
        self.counts.iter().map(|(t, &c)| (t.as_str(), c))
    }

    /// Read-only view of the underlying map.
    #[inline]
    pub fn as_map(&self) -> &FxHashMap<String, Frequency> {
        &self.counts
    }
}
