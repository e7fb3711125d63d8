//! Core types for images, edit results and the session read model.

use serde::{Deserialize, Serialize};

/// A user-selected file as received from the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpload {
    /// Original file name, used for messages only
    pub file_name: String,
    /// Content type declared by the browser (e.g. `image/jpeg`)
    pub content_type: String,
    /// Full file content
    pub bytes: Vec<u8>,
}

/// An ingested image held in memory for the lifetime of a session.
///
/// `encoded_data` is always the base64 encoding of `raw_bytes`; the same
/// string backs both the preview URI and the payload sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Original file name
    pub file_name: String,
    /// Bytes exactly as read from the file
    pub raw_bytes: Vec<u8>,
    /// Standard base64 of `raw_bytes`
    pub encoded_data: String,
    /// Sniffed type, falling back to the declared one
    pub mime_type: String,
    /// `data:` URI the frontend can display directly
    pub preview: String,
}

/// The edited image as returned by the remote client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditedImage {
    /// Always `data:image/png;base64,<data>`
    pub data_uri: String,
}

/// Parsed outcome of one `generateContent` response.
///
/// Produced exactly once per edit request; the image part wins over any text part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditResult {
    /// Base64 payload of the first inline-data part
    Image { data: String },
    /// Text the model returned in place of an image
    Refusal { explanation: String },
    /// No usable candidate or part
    Failure { reason: String },
}

/// Lifecycle phase of the edit session.
///
/// Failures are not a phase of their own: they revert the session to
/// `Ready` with an error message attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Idle,
    Ready,
    Processing,
    Complete,
}

/// Read model pushed to the frontend after every transition.
///
/// Image URIs can be megabytes long, so they travel only in snapshots whose
/// transition changed them (and in full reads). `image_revision` tells the
/// frontend whether the images it holds are current.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub prompt: String,
    /// File name of the ingested image
    pub file_name: Option<String>,
    /// Message of the last failure, shown as a banner
    pub error: Option<String>,
    /// Comparison slider position (0-100)
    pub split_position: f64,
    /// Whether the generate trigger should be enabled
    pub can_generate: bool,
    /// Whether download/open-full actions are available
    pub can_export: bool,
    /// Bumped whenever the original or the visible result changes
    pub image_revision: u64,
    pub images: Option<SessionImages>,
}

/// The displayable images of a session at one revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionImages {
    /// Preview URI of the ingested image
    pub original: Option<String>,
    /// Result URI when the last edit succeeded
    pub result: Option<String>,
}

impl SessionSnapshot {
    pub fn original(&self) -> Option<&str> {
        self.images.as_ref().and_then(|i| i.original.as_deref())
    }

    pub fn result(&self) -> Option<&str> {
        self.images.as_ref().and_then(|i| i.result.as_deref())
    }
}
