//! Noisy-channel spelling correction over a [`FrequencyTable`].
//!
//! Candidates are generated by single-character edits and ranked purely by
//! their prior frequency in the table:
//!
//! 1. The word itself, if it is known
//! 2. Known words one edit away
//! 3. Known words two edits away
//! 4. The word itself, verbatim, when nothing else is known
//!
//! A tier is only consulted when every tier above it is empty, so a single
//! known 1-edit variant suppresses all 2-edit candidates. The 2-edit tier is
//! quadratic in word length and is generated lazily for that reason.
//!
//! # Generation order
//!
//! Ties in probability are broken by generation order, which is fixed:
//! deletes by position, transposes by position, replaces by position then
//! alphabet order, inserts by position then alphabet order. The 2-edit tier
//! walks the outer edits in that order and the inner edits of each in turn.

use crate::frequency::FrequencyTable;
use ahash::AHashSet;
use log::debug;
use std::cmp::Ordering;
use std::rc::Rc;
use std::sync::Arc;

/// Characters used for substitutions and insertions.
pub const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz -";

/// Largest edit distance the cascade explores.
pub const MAX_EDIT_DISTANCE: usize = 2;

/// Probability of a word under the table.
///
/// `Unknown` orders below every `Known` value, including `Known(0.0)`, so an
/// absent word loses every comparison without any infinite arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum Probability {
    Unknown,
    Known(f64),
}

impl Probability {
    pub fn value(&self) -> Option<f64> {
        match self {
            Probability::Known(p) => Some(*p),
            Probability::Unknown => None,
        }
    }
}

/// A duplicate-free set of tokens that remembers insertion order.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    words: Vec<String>,
    seen: AHashSet<String>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `word`, returning `false` if it was already present.
    pub fn insert(&mut self, word: String) -> bool {
        if self.seen.contains(&word) {
            return false;
        }
        self.seen.insert(word.clone());
        self.words.push(word);
        true
    }

    pub fn contains(&self, word: &str) -> bool {
        self.seen.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl IntoIterator for CandidateSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.into_iter()
    }
}

impl FromIterator<String> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = CandidateSet::new();
        for word in iter {
            set.insert(word);
        }
        set
    }
}

/// Proposes and ranks single-word corrections.
#[derive(Debug, Clone)]
pub struct SpellCorrector {
    table: Arc<FrequencyTable>,
}

impl SpellCorrector {
    pub fn new(table: Arc<FrequencyTable>) -> Self {
        Self { table }
    }

    /// `count / total` for known words, [`Probability::Unknown`] otherwise.
    pub fn probability(&self, word: &str) -> Probability {
        match self.table.count(word) {
            Some(count) => Probability::Known(count as f64 / self.table.total() as f64),
            None => Probability::Unknown,
        }
    }

    /// Most probable correction for `word`.
    ///
    /// Returns `word` unchanged when no known word is within two edits.
    pub fn correction(&self, word: &str) -> String {
        let mut best: Option<(String, Probability)> = None;

        for candidate in self.candidates(word) {
            let p = self.probability(&candidate);
            let better = match &best {
                Some((_, best_p)) => p.partial_cmp(best_p) == Some(Ordering::Greater),
                None => true,
            };
            if better {
                best = Some((candidate, p));
            }
        }

        best.map(|(w, _)| w).unwrap_or_else(|| word.to_string())
    }

    /// Known candidates ranked by descending probability, at most `limit`.
    pub fn suggestions(&self, word: &str, limit: usize) -> Vec<(String, Probability)> {
        let mut ranked: Vec<(String, Probability)> = self
            .candidates(word)
            .into_iter()
            .map(|w| {
                let p = self.probability(&w);
                (w, p)
            })
            .collect();

        // stable sort keeps generation order among equals
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.truncate(limit);
        ranked
    }

    /// First non-empty tier of the correction cascade.
    pub fn candidates(&self, word: &str) -> CandidateSet {
        let exact = self.known([word]);
        if !exact.is_empty() {
            return exact;
        }

        let length = word.chars().count();

        // Tiers that cannot reach any table length are skipped entirely.
        if self.table.has_length_near(length, 1) {
            let one = self.known(edits1(word));
            if !one.is_empty() {
                debug!("'{}': {} known 1-edit candidates", word, one.len());
                return one;
            }
        }

        if self.table.has_length_near(length, MAX_EDIT_DISTANCE) {
            let two = self.known(self.reachable_edits2(word));
            if !two.is_empty() {
                debug!("'{}': {} known 2-edit candidates", word, two.len());
                return two;
            }
        }

        debug!("'{}': no known candidates", word);
        let mut verbatim = CandidateSet::new();
        verbatim.insert(word.to_string());
        verbatim
    }

    /// `edits2` in the same order, restricted to strings that can be table
    /// words. Outer edits more than one character away from every table
    /// length are skipped, and inner edits only produce table lengths.
    fn reachable_edits2<'a>(&'a self, word: &str) -> impl Iterator<Item = String> + 'a {
        let table = &self.table;
        edits1(word)
            .into_iter()
            .filter(move |e1| table.has_length_near(e1.chars().count(), 1))
            .flat_map(move |e1| {
                variants_with(&e1, move |length| table.has_length_near(length, 0))
            })
    }

    /// The subset of `words` present in the table, in input order.
    pub fn known<I, S>(&self, words: I) -> CandidateSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = CandidateSet::new();
        for word in words {
            let word = word.as_ref();
            if self.table.contains(word) && !set.contains(word) {
                set.insert(word.to_string());
            }
        }
        set
    }
}

/// All strings one deletion, transposition, substitution or insertion away.
///
/// Substitution runs over the whole [`ALPHABET`], so replacing a character
/// with itself yields `word` as a member.
pub fn edits1(word: &str) -> CandidateSet {
    variants(word).collect()
}

/// Every `edits1` of every `edits1` of `word`.
///
/// Produced lazily and not deduplicated; callers only test membership.
pub fn edits2(word: &str) -> impl Iterator<Item = String> {
    edits1(word).into_iter().flat_map(|e1| variants(&e1))
}

/// One-edit variants in generation order, duplicates included.
fn variants(word: &str) -> impl Iterator<Item = String> {
    variants_with(word, |_| true)
}

/// One-edit variants whose length passes `keep`, built one string at a time.
///
/// Deletes shorten by one, transposes and replaces keep the length, inserts
/// lengthen by one; a kind whose length is rejected is never generated.
fn variants_with<K>(word: &str, keep: K) -> impl Iterator<Item = String>
where
    K: Fn(usize) -> bool,
{
    let chars: Rc<[char]> = word.chars().collect();
    let n = chars.len();

    let delete_end = if n > 0 && keep(n - 1) { n } else { 0 };
    let same_end = if keep(n) { n } else { 0 };
    let insert_end = if keep(n + 1) { n + 1 } else { 0 };

    let deletes = {
        let chars = Rc::clone(&chars);
        (0..delete_end).map(move |i| join(&chars[..i], &[], &chars[i + 1..]))
    };

    let transposes = {
        let chars = Rc::clone(&chars);
        (0..same_end.saturating_sub(1))
            .map(move |i| join(&chars[..i], &[chars[i + 1], chars[i]], &chars[i + 2..]))
    };

    let replaces = {
        let chars = Rc::clone(&chars);
        (0..same_end).flat_map(move |i| {
            let chars = Rc::clone(&chars);
            ALPHABET
                .chars()
                .map(move |c| join(&chars[..i], &[c], &chars[i + 1..]))
        })
    };

    let inserts = (0..insert_end).flat_map(move |i| {
        let chars = Rc::clone(&chars);
        ALPHABET
            .chars()
            .map(move |c| join(&chars[..i], &[c], &chars[i..]))
    });

    deletes.chain(transposes).chain(replaces).chain(inserts)
}

fn join(left: &[char], middle: &[char], right: &[char]) -> String {
    let mut s = String::with_capacity(left.len() + middle.len() + right.len());
    s.extend(left);
    s.extend(middle);
    s.extend(right);
    s
}
