// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor error taxonomy.
//!
//! Document-level failures abort the operation before the live project is
//! touched. Per-object paint failures are reported through
//! [`crate::render::RenderError`] instead and never abort a frame.

use std::path::PathBuf;

/// Convenience result type used by editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors surfaced by editor, store and file operations.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// A named UI action has no command bound to it.
    #[error("no binding for action `{action}`")]
    BindingMissing { action: String },

    /// An image asset could not be decoded.
    #[error("failed to decode image {}: {reason}", path.display())]
    DecodeFailure { path: PathBuf, reason: String },

    /// A loaded or imported project breaks the document invariants.
    #[error("malformed project: {0}")]
    MalformedInput(String),

    /// The saved-project store could not be read or written.
    #[error("storage failure: {0}")]
    StorageFailure(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EditorError {
    pub fn binding_missing(action: impl Into<String>) -> Self {
        Self::BindingMissing {
            action: action.into(),
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageFailure(msg.into())
    }

    /// Whether the error only needs logging rather than a user-visible message.
    pub fn is_log_only(&self) -> bool {
        matches!(self, Self::BindingMissing { .. })
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}
