//! Error types for the retouching app.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.
//! `RetouchError` serializes as its display message, which is what commands reject with.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use serde::{Serialize, Serializer};

/// Fallback shown when a remote failure carries no message of its own.
pub const GENERIC_EDIT_FAILURE: &str = "Failed to edit image";

/// Fallback shown when the session receives an error with an empty message.
pub const GENERIC_SESSION_FAILURE: &str =
    "An unexpected error occurred while processing the image.";

/// Errors raised while turning a user-selected file into an `ImageFile`.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum IngestError {
    /// Declared content type is not an image
    #[error("Please upload an image file (got '{0}')")]
    InvalidFileType(String),
    /// The selected file has no content
    #[error("The selected file is empty: {0}")]
    EmptyFile(String),
    /// File could not be read
    #[error("Failed to read '{path}': {reason}")]
    Io { path: PathBuf, reason: String },
}

/// Failures of a single remote edit attempt.
///
/// The `Display` output of each variant is the exact text shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum EditError {
    /// No API key was configured; raised before any network attempt
    #[error("API Key is missing. Please ensure the API_KEY environment variable is available.")]
    MissingCredential,
    /// The model answered with text instead of an image
    #[error("Model refused or replied with text: {0}")]
    Refusal(String),
    /// The response carried no usable candidate or part
    #[error("{0}")]
    NoImageReturned(String),
    /// Any other transport or service failure
    #[error("{0}")]
    TransportOrServiceFailure(String),
}

/// Main error type for the application.
///
/// All errors are converted to this type before being returned to the frontend.
#[derive(Error, Debug)]
pub enum RetouchError {
    /// Image ingestion failed
    #[error("{0}")]
    Ingest(#[from] IngestError),

    /// Remote edit failed
    #[error("{0}")]
    Edit(#[from] EditError),

    /// Export or open-full was requested without a completed edit
    #[error("There is no edited image to export")]
    NothingToExport,

    /// Result export failed
    #[error("Export error: {0}")]
    Export(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),

    /// A background task could not be joined
    #[error("Task error: {0}")]
    Task(String),
}

/// Convenience result type for application operations.
pub type RetouchResult<T> = Result<T, RetouchError>;

impl RetouchError {
    pub fn export<T: Into<String>>(msg: T) -> Self {
        Self::Export(msg.into())
    }

    pub fn task<T: Into<String>>(msg: T) -> Self {
        Self::Task(msg.into())
    }
}

impl EditError {
    /// Builds a transport/service failure, substituting the generic message for an empty one.
    pub fn transport<T: Into<String>>(msg: T) -> Self {
        let msg = msg.into();
        if msg.trim().is_empty() {
            Self::TransportOrServiceFailure(GENERIC_EDIT_FAILURE.to_string())
        } else {
            Self::TransportOrServiceFailure(msg)
        }
    }

    /// Message stored on the session when this failure reverts it to `Ready`.
    pub fn user_message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            GENERIC_SESSION_FAILURE.to_string()
        } else {
            msg
        }
    }
}

impl Serialize for RetouchError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

// Convert std::io::Error to RetouchError
impl From<io::Error> for RetouchError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}
