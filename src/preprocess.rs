//! Text normalization rules applied before checking.
//!
//! Rules run in the order they are supplied. The corrector and segmentor
//! assume input already restricted to the correction alphabet; these rules
//! are how raw text gets there.

use crate::corrector::ALPHABET;

/// A single normalization step.
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, text: &str) -> String;
}

/// Lowercases all characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lowercase;

impl Rule for Lowercase {
    fn name(&self) -> &'static str {
        "lowercase"
    }

    fn apply(&self, text: &str) -> String {
        text.to_lowercase()
    }
}

/// Drops every character outside the correction alphabet, keeping whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct StripPunctuation;

impl Rule for StripPunctuation {
    fn name(&self) -> &'static str {
        "strip-punctuation"
    }

    fn apply(&self, text: &str) -> String {
        text.chars()
            .filter(|c| c.is_whitespace() || ALPHABET.contains(*c))
            .collect()
    }
}

/// Replaces runs of whitespace with a single space and trims the ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollapseWhitespace;

impl Rule for CollapseWhitespace {
    fn name(&self) -> &'static str {
        "collapse-whitespace"
    }

    fn apply(&self, text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Lowercase, strip punctuation, collapse whitespace.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(Lowercase),
        Box::new(StripPunctuation),
        Box::new(CollapseWhitespace),
    ]
}

/// Run `rules` over `text` in order.
pub fn apply_all(rules: &[Box<dyn Rule>], text: &str) -> String {
    rules
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = default_rules();
        assert_eq!(
            apply_all(&rules, "  Hello,   World!  Well-known\tTHING. "),
            "hello world well-known thing"
        );
    }

    #[test]
    fn test_rule_order_matters() {
        // Uppercase letters are outside the alphabet until lowercased.
        let strip_first: Vec<Box<dyn Rule>> = vec![Box::new(StripPunctuation), Box::new(Lowercase)];
        assert_eq!(apply_all(&strip_first, "ABc"), "c");
    }

    #[test]
    fn test_no_rules_is_identity() {
        assert_eq!(apply_all(&[], "As Is!"), "As Is!");
    }

    #[test]
    fn test_names() {
        let names: Vec<&str> = default_rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["lowercase", "strip-punctuation", "collapse-whitespace"]);
    }
}
