//! Error types for table construction, dictionary loading and configuration.
//!
//! Lookups of absent words are never errors: the corrector ranks them with
//! [`Probability::Unknown`](crate::corrector::Probability) and the segmentor
//! scores them as unknown pieces. Only construction-time problems surface here.

use std::io;

use thiserror::Error;

/// The error type for spellseg operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The frequency source contained no entries.
    #[error("frequency table is empty")]
    EmptyTable,

    /// Every entry in the frequency source had a count of zero.
    #[error("frequency table total count is zero")]
    ZeroTotal,

    /// I/O errors while reading a dictionary file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be loaded or stored.
    #[error("config error: {0}")]
    Config(#[from] confy::ConfyError),

    /// Input rejected by the caller-side length guard.
    #[error("input is {length} characters long, limit is {limit}")]
    InputTooLong { length: usize, limit: usize },
}

/// Result type alias for spellseg operations.
pub type Result<T> = std::result::Result<T, Error>;
