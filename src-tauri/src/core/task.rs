//! Identities of asynchronous work started by the session.

use std::fmt;
use std::sync::Arc;

use crate::core::ImageFile;

/// Identity of one edit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edit#{}", self.0)
    }
}

/// Identity of one file selection or drop.
///
/// Carries the session epoch it was issued in, so a reset invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IngestTicket {
    pub(crate) sequence: u64,
    pub(crate) epoch: u64,
}

impl fmt::Display for IngestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ingest#{}@{}", self.sequence, self.epoch)
    }
}

/// A single edit to send to the remote client.
///
/// Always built from the originally ingested image, never from a previous result.
#[derive(Debug, Clone)]
pub struct EditRequest {
    pub id: RequestId,
    pub source_image: Arc<ImageFile>,
    /// Sent as-is, even when empty
    pub prompt: String,
}
