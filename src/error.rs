//! Errors surfaced while building a matcher.
//!
//! Query paths never fail: a rule that cannot be ingested is dropped at
//! insertion time and the matcher stays usable.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The supplied shortcut does not have the configured byte length.
    #[error("shortcut {shortcut:?} has illegal length {actual}, expected {expected}")]
    InvalidShortcutLength {
        shortcut: String,
        expected: usize,
        actual: usize,
    },

    /// The rule's regex failed to compile.
    #[error("invalid regex: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// The rule file could not be read.
    #[error(transparent)]
    Io(#[from] io::Error),
}
