//! Core error types for slugline parsing
//!
//! Provides the main `CoreError` enum shared by the format parsers and the
//! decoding helpers. Soft problems (degraded headings, skipped paragraphs)
//! are never errors; they are reported as [`ParseIssue`](crate::ParseIssue)
//! values on the parsed [`Screenplay`](crate::Screenplay).

use crate::ScriptFormat;
use core::fmt;
use thiserror::Error;

/// Main error type for slugline core operations
///
/// A `CoreError` is terminal for the current import attempt: nothing is
/// retried and no partial scene list accompanies it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The FDX document is not well-formed XML
    #[error("Malformed FDX document at byte {position}: {message}")]
    MalformedXml { message: String, position: u64 },

    /// The document parsed but contains no scene headings
    #[error("No scene headings found in {format} document")]
    NoScenesFound { format: ScriptFormat },

    /// Source bytes are not valid UTF-8 and strict decoding was requested
    #[error("Invalid UTF-8 at byte {position}: {message}")]
    InvalidEncoding { position: usize, message: String },
}

impl CoreError {
    /// Create a malformed-XML error
    pub fn malformed_xml<T: fmt::Display>(message: T, position: u64) -> Self {
        Self::MalformedXml {
            message: message.to_string(),
            position,
        }
    }

    /// Whether the document itself could not be read structurally
    ///
    /// Distinguishes broken input from valid prose that simply lacks
    /// headings.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::MalformedXml { .. } | Self::InvalidEncoding { .. })
    }
}
