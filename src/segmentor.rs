//! Word segmentation of run-on strings.
//!
//! `segment` considers every split of the input into a first piece and a
//! remainder, segments the remainder recursively, and keeps the sequence
//! whose corrected pieces are jointly most probable under a unigram model.
//! Results are memoized on the exact input string, which turns the
//! exponential recursion into one evaluation per distinct suffix. Piece
//! corrections are cached alongside, since the same short pieces recur at
//! every suffix.
//!
//! # Scoring
//!
//! Pieces are scored by the frequency of their *correction*, not their own
//! frequency. Probabilities are combined as a sum of logarithms, and pieces
//! whose correction has no probability are counted instead of multiplied in.
//! Sequences are ranked by, in order:
//!
//! 1. fewest characters in unknown pieces
//! 2. fewest unknown pieces
//! 3. highest log-probability
//! 4. fewest pieces that needed correcting
//!
//! Remaining ties go to the shortest first piece.

use crate::corrector::{SpellCorrector, MAX_EDIT_DISTANCE};
use crate::frequency::FrequencyTable;
use ahash::AHashMap;
use log::debug;
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::sync::Arc;

/// Default look-ahead bound for the first piece.
pub const DEFAULT_LOOKAHEAD: usize = 5;

/// Ranking of a piece sequence. Greater is better.
#[derive(Debug, Clone, Copy)]
pub struct Score {
    unknown_chars: usize,
    unknown: usize,
    log_prob: f64,
    corrected: usize,
}

impl Score {
    /// Score of the empty sequence.
    pub const EMPTY: Score = Score {
        unknown_chars: 0,
        unknown: 0,
        log_prob: 0.0,
        corrected: 0,
    };

    fn piece(prob: f64, length: usize, corrected: bool) -> Self {
        let corrected = usize::from(corrected);
        if prob > 0.0 {
            Score {
                unknown_chars: 0,
                unknown: 0,
                log_prob: prob.ln(),
                corrected,
            }
        } else {
            Score {
                unknown_chars: length,
                unknown: 1,
                log_prob: 0.0,
                corrected,
            }
        }
    }

    fn then(self, rest: Score) -> Self {
        Score {
            unknown_chars: self.unknown_chars + rest.unknown_chars,
            unknown: self.unknown + rest.unknown,
            log_prob: self.log_prob + rest.log_prob,
            corrected: self.corrected + rest.corrected,
        }
    }

    /// Number of pieces whose correction is absent from the table.
    pub fn unknown(&self) -> usize {
        self.unknown
    }

    /// Sum of the log-probabilities of the known pieces.
    pub fn log_prob(&self) -> f64 {
        self.log_prob
    }

    /// Joint probability, `0.0` as soon as one piece is unknown.
    pub fn probability(&self) -> f64 {
        if self.unknown > 0 {
            0.0
        } else {
            self.log_prob.exp()
        }
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .unknown_chars
            .cmp(&self.unknown_chars)
            .then_with(|| other.unknown.cmp(&self.unknown))
            .then_with(|| self.log_prob.total_cmp(&other.log_prob))
            .then_with(|| other.corrected.cmp(&self.corrected))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

/// Splits unbroken text into the most probable sequence of words.
pub struct Segmentor {
    table: Arc<FrequencyTable>,
    corrector: SpellCorrector,
    lookahead: usize,
    memo: Mutex<AHashMap<String, (Vec<String>, Score)>>,
    corrections: Mutex<AHashMap<String, String>>,
}

impl Segmentor {
    pub fn new(table: Arc<FrequencyTable>, corrector: SpellCorrector) -> Self {
        Self {
            table,
            corrector,
            lookahead: DEFAULT_LOOKAHEAD,
            memo: Mutex::new(AHashMap::new()),
            corrections: Mutex::new(AHashMap::new()),
        }
    }

    /// Set the minimum look-ahead for the first piece.
    ///
    /// The window never drops below the longest table word plus the edit
    /// budget, so values up to that floor leave segmentation unchanged and
    /// only larger values widen it.
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead.max(1);
        self
    }

    pub fn corrector(&self) -> &SpellCorrector {
        &self.corrector
    }

    /// Best segmentation of `text`. Empty text yields no pieces.
    ///
    /// Pieces are returned as they appear in the input, uncorrected.
    pub fn segment(&self, text: &str) -> Vec<String> {
        self.best(text).0
    }

    fn best(&self, text: &str) -> (Vec<String>, Score) {
        if text.is_empty() {
            return (Vec::new(), Score::EMPTY);
        }

        // The lock is never held across the recursive calls below.
        if let Some(hit) = self.memo.lock().get(text) {
            return hit.clone();
        }

        let mut best: Option<(Vec<String>, Score)> = None;

        for (first, rest) in self.splits(text) {
            let (rest_pieces, rest_score) = self.best(rest);
            let first = first.trim();

            let candidate = if first.is_empty() {
                (rest_pieces, rest_score)
            } else {
                let score = self.piece_score(first).then(rest_score);
                let mut pieces = Vec::with_capacity(rest_pieces.len() + 1);
                pieces.push(first.to_string());
                pieces.extend(rest_pieces);
                (pieces, score)
            };

            let better = match &best {
                Some((_, best_score)) => candidate.1 > *best_score,
                None => true,
            };
            if better {
                best = Some(candidate);
            }
        }

        let best = best.unwrap_or_else(|| (Vec::new(), Score::EMPTY));
        let mut memo = self.memo.lock();
        memo.insert(text.to_string(), best.clone());
        debug!("memoized '{}' ({} entries)", text, memo.len());
        best
    }

    /// `(first, rest)` pairs with `first` growing one character at a time.
    ///
    /// The first piece is bounded by the look-ahead or by the longest table
    /// word plus the edit budget, whichever is larger; anything longer cannot
    /// correct to a known word. The whole text is always the last candidate
    /// so that unknown runs can stay in one piece.
    pub fn splits<'a>(&self, text: &'a str) -> Vec<(&'a str, &'a str)> {
        let window = self
            .lookahead
            .max(self.table.max_length() + MAX_EDIT_DISTANCE);

        let mut splits: Vec<(&str, &str)> = text
            .char_indices()
            .skip(1)
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .take(window)
            .map(|i| text.split_at(i))
            .collect();

        if splits.last().is_some_and(|(_, rest)| !rest.is_empty()) {
            splits.push((text, ""));
        }
        splits
    }

    /// Aggregate score of `pieces`, each scored by its correction.
    pub fn pwords<S: AsRef<str>>(&self, pieces: &[S]) -> Score {
        pieces
            .iter()
            .rev()
            .fold(Score::EMPTY, |acc, piece| self.piece_score(piece.as_ref()).then(acc))
    }

    /// Raw `count / total`, `0.0` for absent words.
    pub fn word_prob(&self, word: &str) -> f64 {
        self.table
            .count(word)
            .map(|c| c as f64 / self.table.total() as f64)
            .unwrap_or(0.0)
    }

    /// Correction of `piece`, cached for the lifetime of the memo.
    pub fn correction(&self, piece: &str) -> String {
        if let Some(hit) = self.corrections.lock().get(piece) {
            return hit.clone();
        }

        let corrected = self.corrector.correction(piece);
        self.corrections
            .lock()
            .insert(piece.to_string(), corrected.clone());
        corrected
    }

    fn piece_score(&self, piece: &str) -> Score {
        let corrected = self.correction(piece);
        Score::piece(
            self.word_prob(&corrected),
            piece.chars().count(),
            corrected != piece,
        )
    }

    /// Number of memoized inputs.
    pub fn memo_len(&self) -> usize {
        self.memo.lock().len()
    }

    /// Number of cached piece corrections.
    pub fn corrections_len(&self) -> usize {
        self.corrections.lock().len()
    }

    /// Drop every memoized segmentation and cached correction.
    pub fn clear_memo(&self) {
        self.memo.lock().clear();
        self.corrections.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmentor(words: &[(&str, u64)]) -> Segmentor {
        let table = Arc::new(FrequencyTable::new(words.iter().map(|&(w, c)| (w, c))).unwrap());
        let corrector = SpellCorrector::new(table.clone());
        Segmentor::new(table, corrector)
    }

    #[test]
    fn test_empty_text() {
        let ws = segmentor(&[("the", 1)]);
        assert!(ws.segment("").is_empty());
        assert_eq!(ws.memo_len(), 0);
    }

    #[test]
    fn test_frequent_short_word_absorbs_letters() {
        // "t" is two insertions from "the", and two "the" pieces outscore
        // "the" + "cat" when "the" is twice as frequent.
        let ws = segmentor(&[("the", 10), ("cat", 5)]);
        assert_eq!(ws.segment("thecat"), vec!["theca", "t"]);
    }

    #[test]
    fn test_known_words_keep_boundaries() {
        let ws = segmentor(&[("the", 5), ("cat", 5)]);
        assert_eq!(ws.segment("thecat"), vec!["the", "cat"]);
        assert_eq!(ws.segment("catthe"), vec!["cat", "the"]);
    }

    #[test]
    fn test_whitespace_pieces_dropped() {
        let ws = segmentor(&[("the", 5), ("cat", 5)]);
        assert_eq!(ws.segment("the cat"), vec!["the", "cat"]);
        assert!(ws.segment("  ").is_empty());
    }

    #[test]
    fn test_unknown_text_stays_whole() {
        let ws = segmentor(&[("the", 5), ("cat", 5)]);
        assert_eq!(ws.segment("xyzzy"), vec!["xyzzy"]);
        assert_eq!(ws.segment("qqqqqqqqqq"), vec!["qqqqqqqqqq"]);
    }

    #[test]
    fn test_unknown_run_split_from_known_word() {
        // Two of the q's are within the edit budget of "cat".
        let ws = segmentor(&[("the", 5), ("cat", 5)]);
        assert_eq!(ws.segment("qqqqqqqcat"), vec!["qqqqq", "qqcat"]);
    }

    #[test]
    fn test_memo_reused() {
        let ws = segmentor(&[("the", 5), ("cat", 5)]);
        let first = ws.segment("thecat");
        let entries = ws.memo_len();
        assert!(entries >= "thecat".len());
        assert_eq!(ws.segment("thecat"), first);
        assert_eq!(ws.memo_len(), entries);

        ws.clear_memo();
        assert_eq!(ws.memo_len(), 0);
        assert_eq!(ws.corrections_len(), 0);
    }

    #[test]
    fn test_corrections_cached() {
        let ws = segmentor(&[("the", 5), ("cat", 5)]);
        ws.segment("tehcat");
        let cached = ws.corrections_len();
        // Every split of every suffix scores a distinct piece at most once.
        assert!(cached > 0);
        assert!(cached <= ws.memo_len() * (ws.memo_len() + 1) / 2);

        assert_eq!(ws.correction("teh"), "the");
        assert_eq!(ws.corrections_len(), cached);
        assert_eq!(ws.correction("teh"), ws.corrector().correction("teh"));

        ws.segment("tehcat");
        assert_eq!(ws.corrections_len(), cached);
    }

    #[test]
    fn test_lookahead_above_floor_widens_window() {
        let text = "x".repeat(20);
        let narrow = segmentor(&[("the", 5), ("cat", 5)]).with_lookahead(2);
        let floor = segmentor(&[("the", 5), ("cat", 5)]);
        let wide = segmentor(&[("the", 5), ("cat", 5)]).with_lookahead(8);
        // floor is max_length + 2 = 5, plus the whole-text candidate
        assert_eq!(narrow.splits(&text).len(), 6);
        assert_eq!(floor.splits(&text).len(), 6);
        assert_eq!(wide.splits(&text).len(), 9);
        assert_eq!(wide.splits(&text)[7], ("xxxxxxxx", "xxxxxxxxxxxx"));
    }

    #[test]
    fn test_splits_window() {
        let ws = segmentor(&[("ab", 1)]);
        let splits = ws.splits("abcdefgh");
        assert_eq!(splits.len(), DEFAULT_LOOKAHEAD + 1);
        assert_eq!(splits[0], ("a", "bcdefgh"));
        assert_eq!(splits[4], ("abcde", "fgh"));
        assert_eq!(splits[5], ("abcdefgh", ""));

        let short = ws.splits("ab");
        assert_eq!(short, vec![("a", "b"), ("ab", "")]);
    }

    #[test]
    fn test_splits_window_follows_longest_word() {
        let ws = segmentor(&[("segmentation", 1)]).with_lookahead(2);
        assert_eq!(ws.splits(&"x".repeat(20)).len(), 15);
    }

    #[test]
    fn test_word_prob() {
        let ws = segmentor(&[("the", 3), ("cat", 1)]);
        assert_eq!(ws.word_prob("the"), 0.75);
        assert_eq!(ws.word_prob("dog"), 0.0);
    }

    #[test]
    fn test_pwords_scores_corrections() {
        let ws = segmentor(&[("the", 3), ("cat", 1)]);
        let exact = ws.pwords(&["the", "cat"]);
        let misspelled = ws.pwords(&["teh", "cat"]);
        assert!((exact.probability() - 0.1875).abs() < 1e-12);
        assert_eq!(exact.log_prob(), misspelled.log_prob());
        assert!(exact > misspelled);

        let unknown = ws.pwords(&["the", "qqqqqq"]);
        assert_eq!(unknown.unknown(), 1);
        assert_eq!(unknown.probability(), 0.0);
        assert!(unknown < misspelled);
        assert_eq!(ws.pwords::<&str>(&[]), Score::EMPTY);
    }

    #[test]
    fn test_score_order() {
        let known = Score::piece(0.01, 3, false);
        let unknown = Score::piece(0.0, 3, false);
        assert!(known > unknown);
        assert!(known.then(known) < known);
        assert!(unknown.then(known) < known.then(known).then(known));
        assert!(Score::piece(0.0, 2, false) > Score::piece(0.0, 4, false));
        assert!(unknown > Score::piece(0.0, 1, false).then(Score::piece(0.0, 2, false)));
        assert!(Score::piece(0.5, 3, false) > Score::piece(0.5, 3, true));
    }
}
