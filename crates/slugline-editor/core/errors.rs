//! Error types for the slugline-editor crate
//!
//! Provides the main `EditorError` enum that wraps `CoreError` from
//! slugline-core and adds session-specific cases: lifecycle violations,
//! unknown scenes and draft misuse.

use crate::sessions::LifecycleState;
use core::fmt;
use slugline_core::{CoreError, SceneId};
use thiserror::Error;

/// Main error type for slugline-editor operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Errors from slugline-core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Operation not allowed in the session's current state
    #[error("Cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: LifecycleState,
    },

    /// No scene with this id (never existed or already deleted)
    #[error("Scene not found: {id}")]
    SceneNotFound { id: SceneId },

    /// Draft operation with no scene being edited
    #[error("No scene is being edited")]
    NoActiveEdit,

    /// Edited location is blank
    #[error("Location must not be empty")]
    EmptyLocation,

    /// Source file exceeds the configured size limit
    #[error("File too large: {size} bytes (limit {limit})")]
    FileTooLarge { size: u64, limit: u64 },

    /// Command execution failed
    #[error("Command execution failed: {message}")]
    CommandFailed { message: String },

    /// Import error
    #[error("IO error: {0}")]
    IoError(String),
}

impl EditorError {
    /// Create an invalid-state error
    pub const fn invalid_state(operation: &'static str, state: LifecycleState) -> Self {
        Self::InvalidState { operation, state }
    }

    /// Create a new command failed error
    pub fn command_failed<T: fmt::Display>(message: T) -> Self {
        Self::CommandFailed {
            message: message.to_string(),
        }
    }

    /// Create a new IO error
    pub fn io<T: fmt::Display>(message: T) -> Self {
        Self::IoError(message.to_string())
    }

    /// Check if the session is still usable after this error
    ///
    /// Parse failures end the import attempt; the caller has to clear the
    /// session and pick another file.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Core(_) | Self::FileTooLarge { .. } | Self::IoError(_) => false,
            Self::InvalidState { .. }
            | Self::SceneNotFound { .. }
            | Self::NoActiveEdit
            | Self::EmptyLocation
            | Self::CommandFailed { .. } => true,
        }
    }

    /// Check if this error rejected a mutation on a committed session
    #[must_use]
    pub const fn is_post_commit_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidState {
                state: LifecycleState::Imported,
                ..
            }
        )
    }

    /// Get the underlying core error if this wraps one
    #[must_use]
    pub const fn as_core_error(&self) -> Option<&CoreError> {
        match self {
            Self::Core(core_err) => Some(core_err),
            _ => None,
        }
    }
}

/// Result type alias for editor operations
pub type Result<T> = core::result::Result<T, EditorError>;
