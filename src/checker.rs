//! Checkers turn input tokens into corrected word sequences.
//!
//! [`Checker`] is the seam for alternative implementations; it owns the
//! preprocessing rules and the text-level `check` loop. [`ScratchChecker`]
//! implements it with the frequency-table corrector and segmentor.

use crate::config::Config;
use crate::corrector::SpellCorrector;
use crate::frequency::FrequencyTable;
use crate::preprocess::{self, Rule};
use crate::segmentor::Segmentor;
use log::debug;
use std::sync::Arc;

/// A spell checker over tokens of the correction alphabet.
pub trait Checker {
    /// Rules applied by [`Checker::check`] before tokenizing.
    fn rules(&self) -> &[Box<dyn Rule>];

    /// Correct and segment a single token.
    fn process(&self, word: &str) -> Vec<String>;

    /// Normalize `text`, split it on whitespace and process every token.
    fn check(&self, text: &str) -> Vec<String> {
        let normalized = preprocess::apply_all(self.rules(), text);
        normalized
            .split_whitespace()
            .flat_map(|token| self.process(token))
            .collect()
    }
}

/// Checker built purely from token frequencies.
pub struct ScratchChecker {
    table: Arc<FrequencyTable>,
    corrector: SpellCorrector,
    segmentor: Segmentor,
    rules: Vec<Box<dyn Rule>>,
}

impl ScratchChecker {
    /// Checker with the default look-ahead and the default rules.
    pub fn new(table: Arc<FrequencyTable>) -> Self {
        Self::new_with_config(table, &Config::default())
    }

    pub fn new_with_config(table: Arc<FrequencyTable>, config: &Config) -> Self {
        let corrector = SpellCorrector::new(table.clone());
        let segmentor =
            Segmentor::new(table.clone(), corrector.clone()).with_lookahead(config.lookahead);

        Self {
            table,
            corrector,
            segmentor,
            rules: preprocess::default_rules(),
        }
    }

    /// Replace the preprocessing rules.
    pub fn with_rules(mut self, rules: Vec<Box<dyn Rule>>) -> Self {
        self.rules = rules;
        self
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn corrector(&self) -> &SpellCorrector {
        &self.corrector
    }

    pub fn segmentor(&self) -> &Segmentor {
        &self.segmentor
    }
}

impl Checker for ScratchChecker {
    fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Known words are returned as-is, even when a split would score higher.
    /// Anything else is segmented and every piece corrected.
    fn process(&self, word: &str) -> Vec<String> {
        if word.is_empty() {
            return Vec::new();
        }

        if self.table.contains(word) {
            return vec![word.to_string()];
        }

        let pieces = self.segmentor.segment(word);
        debug!("segmented '{}' into {:?}", word, pieces);

        pieces
            .iter()
            .map(|piece| self.segmentor.correction(piece))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(words: &[(&str, u64)]) -> ScratchChecker {
        let table = FrequencyTable::new(words.iter().map(|&(w, c)| (w, c))).unwrap();
        ScratchChecker::new(Arc::new(table))
    }

    #[test]
    fn test_end_to_end() {
        let checker = checker(&[("spelling", 10), ("corrector", 5), ("the", 100), ("quick", 3)]);
        assert_eq!(checker.table().total(), 118);
        assert_eq!(
            checker.process("thequickspellingcorrector"),
            vec!["the", "quick", "spelling", "corrector"]
        );
    }

    #[test]
    fn test_known_word_never_split() {
        // "therapist" segments better as "the" + "rapist" but is a table entry.
        let checker = checker(&[("the", 1000), ("rapist", 500), ("therapist", 1)]);
        assert_eq!(checker.process("therapist"), vec!["therapist"]);
    }

    #[test]
    fn test_empty_input() {
        let checker = checker(&[("the", 1)]);
        assert!(checker.process("").is_empty());
        assert!(checker.check("").is_empty());
    }

    #[test]
    fn test_pieces_are_corrected() {
        let checker = checker(&[("the", 5), ("cat", 5)]);
        assert_eq!(checker.process("tehcat"), vec!["the", "cat"]);
        assert_eq!(checker.segmentor().correction("teh"), "the");
        assert!(checker.segmentor().corrections_len() > 0);
    }

    #[test]
    fn test_output_is_fixed_point() {
        let checker = checker(&[("the", 5), ("cat", 5), ("sat", 5)]);
        let first = checker.process("thecatsta");
        let rejoined = first.concat();
        assert_eq!(checker.segmentor().segment(&rejoined), first);
        assert_eq!(checker.process(&rejoined), first);
    }

    #[test]
    fn test_uncorrectable_is_stable() {
        let checker = checker(&[("the", 10)]);
        assert_eq!(checker.process("qqqqqqq"), vec!["qqqqqqq"]);
        assert_eq!(checker.process("qqqqqqq"), checker.process("qqqqqqq"));
    }

    #[test]
    fn test_check_applies_rules() {
        let checker = checker(&[("the", 5), ("cat", 5), ("sat", 5)]);
        assert_eq!(checker.check("The CAT, sat!"), vec!["the", "cat", "sat"]);
        assert_eq!(checker.check("Thecat  sta"), vec!["the", "cat", "sat"]);
    }

    #[test]
    fn test_custom_rules() {
        let table = FrequencyTable::new([("cat", 1)]).unwrap();
        let checker = ScratchChecker::new(Arc::new(table)).with_rules(Vec::new());
        assert!(checker.rules().is_empty());
        assert_eq!(checker.check("cat"), vec!["cat"]);
    }
}
