//! Error types for the find/replace filter
//!
//! This module provides error handling using the `thiserror` crate.
//! Errors are categorized by their source: pattern construction, flag
//! handling, or stream I/O.

use thiserror::Error;

/// The main error type for the filter
#[derive(Error, Debug)]
pub enum RegexpError {
    /// The translated pattern was rejected by the host regex engine
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        /// The pattern after translation to the host dialect
        pattern: String,
        /// The underlying engine error
        #[source]
        source: regex::Error,
    },

    /// A residual flag character has no host engine counterpart
    #[error("unsupported regex flag '{0}'")]
    UnsupportedFlag(char),

    /// Two flags that cannot be combined.
    ///
    /// Reserved: every combination is currently accepted.
    #[error("flags '{0}' and '{1}' cannot be combined")]
    FlagConflict(char, char),

    /// Reading the input or writing the output failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegexpError {
    /// Whether this error is a closed downstream pipe
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, RegexpError::Io(e) if e.kind() == std::io::ErrorKind::BrokenPipe)
    }
}

/// Result type alias for filter operations
pub type Result<T> = std::result::Result<T, RegexpError>;
