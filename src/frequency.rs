//! Immutable word-frequency table shared by the corrector and the segmentor.

use crate::error::{Error, Result};
use ahash::AHashMap;

/// Word → occurrence count, with the derived total and longest word length.
///
/// The table is built once and never mutated afterwards. Components hold it
/// behind an `Arc` so the same counts are read by every stage.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: AHashMap<String, u64>,
    total: u64,
    max_length: usize,
    lengths: Vec<usize>,
}

impl FrequencyTable {
    /// Build a table from a key → count source.
    ///
    /// # Errors
    /// Returns [`Error::EmptyTable`] when the source has no entries and
    /// [`Error::ZeroTotal`] when all counts are zero, so probabilities are
    /// never computed against a zero denominator.
    pub fn new<I, S>(counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let counts: AHashMap<String, u64> = counts
            .into_iter()
            .map(|(word, count)| (word.into(), count))
            .collect();

        if counts.is_empty() {
            return Err(Error::EmptyTable);
        }

        let total = counts.values().fold(0u64, |acc, &c| acc.saturating_add(c));
        if total == 0 {
            return Err(Error::ZeroTotal);
        }

        let mut lengths: Vec<usize> = counts.keys().map(|w| w.chars().count()).collect();
        lengths.sort_unstable();
        lengths.dedup();
        let max_length = lengths.last().copied().unwrap_or(0);

        Ok(Self {
            counts,
            total,
            max_length,
            lengths,
        })
    }

    /// Count for `word`, or `None` if the word is not in the table.
    pub fn count(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    /// Sum of all counts. Always greater than zero.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Length in characters of the longest word.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Whether some word is within `distance` characters of `length`.
    ///
    /// Every edit changes the length by at most one, so a string failing this
    /// check for `distance` edits cannot reach any table entry.
    pub fn has_length_near(&self, length: usize, distance: usize) -> bool {
        self.lengths.iter().any(|&l| l.abs_diff(length) <= distance)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
