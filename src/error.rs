//! Error types for VDF parsing and file handling.

use thiserror::Error;

/// Result type for VDF operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Create a parse error with a truncated input snippet (max 50 chars).
pub(crate) fn parse_error(input: &str, offset: usize, context: impl Into<String>) -> Error {
    let snippet = input.chars().take(50).collect();
    Error::Parse {
        snippet,
        offset,
        context: context.into(),
    }
}

/// Errors that can occur while parsing or reading/writing VDF files.
#[derive(Debug, Error)]
pub enum Error {
    /// Parse error with context and a snippet of the offending input.
    #[error("parse error at offset {offset}: {context} (near: \"{snippet}\")")]
    Parse {
        /// A snippet of the input near the error.
        snippet: String,
        /// Byte offset in the input where this occurred.
        offset: usize,
        /// Context describing what was expected.
        context: String,
    },

    /// An error from the underlying IO operation.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
