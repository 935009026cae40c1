//! Spellseg - spelling correction and word segmentation from token frequencies.
//!
//! # Overview
//!
//! Corrections are inferred purely from a table of word counts:
//! - Misspelled words are replaced by the most frequent known word within two
//!   edits (deletion, transposition, substitution, insertion)
//! - Run-on strings are split into the most probable sequence of words
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Input token    │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ ScratchChecker  │ ← Short-circuits known words (checker.rs)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   Segmentor     │ ← Memoized split search (segmentor.rs)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ SpellCorrector  │ ← Edit candidates ranked by frequency (corrector.rs)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ FrequencyTable  │ ← Immutable word counts (frequency.rs, dictionary.rs)
//! └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use spellseg::{Checker, FrequencyTable, ScratchChecker};
//!
//! let table = FrequencyTable::new([
//!     ("spelling", 10),
//!     ("corrector", 5),
//!     ("the", 100),
//!     ("quick", 3),
//! ])
//! .unwrap();
//! let checker = ScratchChecker::new(Arc::new(table));
//!
//! assert_eq!(
//!     checker.process("thequickspellingcorrector"),
//!     vec!["the", "quick", "spelling", "corrector"]
//! );
//! ```

pub mod checker;
pub mod config;
pub mod corrector;
pub mod dictionary;
pub mod error;
pub mod frequency;
pub mod preprocess;
pub mod segmentor;

pub use checker::{Checker, ScratchChecker};
pub use config::Config;
pub use corrector::{Probability, SpellCorrector};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use segmentor::{Score, Segmentor};
