//! Parse error type
//!
//! Parsing is all-or-nothing: the pipeline refuses to split a file it
//! cannot fully read, so the first syntax error aborts the run.

use text_size::TextRange;
use thiserror::Error;

/// A fatal syntax error with its source location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error: {message}")]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,
    /// Byte range of the offending text
    pub range: TextRange,
}

impl ParseError {
    /// Create a new parse error
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}
