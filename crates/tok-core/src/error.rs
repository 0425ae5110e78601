// SPDX-FileCopyrightText: 2026 Tok Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by every tok crate.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Machine-readable classification of a [`TokError`].
///
/// Rendered in `SCREAMING_SNAKE_CASE` both by `Display` and by serde, so the
/// CLI and the MCP server report the same codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    InvalidArgument,
    FileNotFound,
    NotReady,
    EstimatorUnavailable,
    ConfigurationError,
    StorageError,
    ProcessingError,
}

/// The primary error type for estimation, pricing, tracking and storage.
///
/// Every variant is recoverable. Deciding whether a failure ends the process
/// is left to the CLI and the MCP server.
#[derive(Debug, Error)]
pub enum TokError {
    /// Caller-supplied input was missing, empty, non-numeric or out of range.
    #[error("{message}")]
    InvalidArgument { message: String },

    /// A file named on the command line could not be read.
    #[error("Could not read file: {}", path.display())]
    FileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An estimator was used before `initialize` succeeded, or after `dispose`.
    #[error("{estimator} estimator is not initialized; call initialize() first")]
    NotReady { estimator: String },

    /// The precise tokenizer could not be loaded.
    #[error("{estimator} estimator unavailable: {message}")]
    EstimatorUnavailable { estimator: String, message: String },

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(String),

    /// A persisted record could not be written.
    #[error("storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Any other failure while running a command.
    #[error("{0}")]
    Processing(String),
}

impl TokError {
    /// Shorthand for [`TokError::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Shorthand for [`TokError::NotReady`].
    pub fn not_ready(estimator: impl Into<String>) -> Self {
        Self::NotReady {
            estimator: estimator.into(),
        }
    }

    /// Wrap a storage failure with a short description of what was attempted.
    pub fn storage<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The machine-readable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::NotReady { .. } => ErrorKind::NotReady,
            Self::EstimatorUnavailable { .. } => ErrorKind::EstimatorUnavailable,
            Self::Config(_) => ErrorKind::ConfigurationError,
            Self::Storage { .. } => ErrorKind::StorageError,
            Self::Processing(_) => ErrorKind::ProcessingError,
        }
    }
}
