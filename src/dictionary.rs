//! Loading frequency tables from text.
//!
//! # Dictionary Format
//!
//! Dictionary files use a simple text format:
//! ```text
//! # Comments start with #
//! word frequency
//! the 1000000
//! be 500000
//! hello 15000
//! ```
//!
//! If the frequency is omitted or cannot be parsed, it defaults to 1. Words
//! are lowercased, and repeated words have their counts summed.
//!
//! # Built-in Dictionary
//!
//! A small table of common English words is embedded at compile time from
//! `dictionary/words.txt` and used when no dictionary file is configured.

use crate::error::Result;
use crate::frequency::FrequencyTable;
use ahash::AHashMap;
use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const EMBEDDED_DICTIONARY: &str = include_str!("../dictionary/words.txt");

/// Load a frequency table from a dictionary file.
///
/// # Errors
/// Returns an error if the file cannot be read or contains no usable entries.
pub fn load_path(path: &Path) -> Result<FrequencyTable> {
    let file = File::open(path)?;
    let table = parse(BufReader::new(file))?;
    info!(
        "Loaded dictionary from {} with {} words",
        path.display(),
        table.len()
    );
    Ok(table)
}

/// The embedded table of common English words.
pub fn builtin() -> Result<FrequencyTable> {
    let table = parse(EMBEDDED_DICTIONARY.as_bytes())?;
    info!("Loaded embedded dictionary with {} words", table.len());
    Ok(table)
}

/// Parse dictionary lines from any reader.
pub fn parse<R: BufRead>(reader: R) -> Result<FrequencyTable> {
    let mut counts: AHashMap<String, u64> = AHashMap::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            continue;
        };

        let frequency = match parts.next() {
            Some(raw) => raw.parse::<u64>().unwrap_or_else(|_| {
                warn!("line {}: invalid count '{}', using 1", number + 1, raw);
                1
            }),
            None => 1,
        };

        let entry = counts.entry(word.to_lowercase()).or_insert(0);
        *entry = entry.saturating_add(frequency);
    }

    FrequencyTable::new(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_builtin_dictionary() {
        let table = builtin().unwrap();
        assert!(table.len() > 100);
        assert!(table.contains("the"));
        assert!(table.contains("spelling"));
    }

    #[test]
    fn test_parse_format() {
        let text = "# header\n\nthe 100\nHello 7\ncat\nthe 5\nodd x\n";
        let table = parse(text.as_bytes()).unwrap();
        assert_eq!(table.count("the"), Some(105));
        assert_eq!(table.count("hello"), Some(7));
        assert_eq!(table.count("cat"), Some(1));
        assert_eq!(table.count("odd"), Some(1));
        assert_eq!(table.total(), 114);
    }

    #[test]
    fn test_parse_empty_is_error() {
        let result = parse("# nothing here\n".as_bytes());
        assert!(matches!(result, Err(Error::EmptyTable)));
    }

    #[test]
    fn test_parse_zero_counts_is_error() {
        let result = parse("a 0\nb 0\n".as_bytes());
        assert!(matches!(result, Err(Error::ZeroTotal)));
    }

    #[test]
    fn test_missing_file() {
        let result = load_path(Path::new("/nonexistent/words.txt"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
