//! The edit session state machine.
//!
//! Every mutation goes through one of the transition methods below. Work that
//! completes asynchronously (file reads, remote edits) is identified by an
//! [`IngestTicket`] or [`RequestId`]; completions whose identity is no longer
//! current are reported as [`Completion::Stale`] and leave the state untouched.

use std::sync::Arc;
use tracing::debug;

use crate::core::comparison::SplitPosition;
use crate::core::task::{EditRequest, IngestTicket, RequestId};
use crate::core::types::{EditedImage, ImageFile, Phase, SessionImages, SessionSnapshot};
use crate::utils::EditError;

/// Prompt shown for a fresh session and restored on reset.
pub const DEFAULT_PROMPT: &str = "Remove wrinkles from this man's face";

/// Quick-select prompts offered next to the prompt field.
pub const PROMPT_PRESETS: [&str; 5] = [
    "Remove wrinkles",
    "Remove blemishes",
    "Smooth skin",
    "Remove glasses",
    "Make younger",
];

/// Whether an asynchronous completion was applied to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The work was superseded by a reset or a newer action
    Stale,
}

#[derive(Debug)]
pub struct EditSession {
    phase: Phase,
    current_image: Option<Arc<ImageFile>>,
    current_prompt: String,
    last_result: Option<EditedImage>,
    last_error: Option<String>,
    split: SplitPosition,
    /// Request whose response the session is waiting for
    pending: Option<RequestId>,
    /// Bumped on every reset
    epoch: u64,
    /// Bumped whenever the original or the visible result changes
    image_revision: u64,
    /// Most recently issued ingestion that has not completed yet
    latest_ingest: Option<IngestTicket>,
    next_request: u64,
    next_ingest: u64,
}

impl Default for EditSession {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            current_image: None,
            current_prompt: DEFAULT_PROMPT.to_string(),
            last_result: None,
            last_error: None,
            split: SplitPosition::default(),
            pending: None,
            epoch: 0,
            image_revision: 0,
            latest_ingest: None,
            next_request: 1,
            next_ingest: 1,
        }
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_image(&self) -> Option<&Arc<ImageFile>> {
        self.current_image.as_ref()
    }

    pub fn prompt(&self) -> &str {
        &self.current_prompt
    }

    pub fn last_result(&self) -> Option<&EditedImage> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn split(&self) -> SplitPosition {
        self.split
    }

    pub fn pending(&self) -> Option<RequestId> {
        self.pending
    }

    pub fn image_revision(&self) -> u64 {
        self.image_revision
    }

    /// An edit can start when an image is present and none is in flight.
    pub fn can_generate(&self) -> bool {
        self.current_image.is_some() && self.phase != Phase::Processing
    }

    // ── Prompt ──────────────────────────────────────────────────────────────────

    /// Replace the prompt text. Allowed in every phase; never transitions.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.current_prompt = prompt.into();
    }

    /// Replace the prompt with a quick-select preset. Returns false for unknown presets.
    pub fn apply_preset(&mut self, preset: &str) -> bool {
        match PROMPT_PRESETS.iter().find(|p| **p == preset) {
            Some(p) => {
                self.current_prompt = (*p).to_string();
                true
            }
            None => false,
        }
    }

    // ── Ingestion ───────────────────────────────────────────────────────────────

    /// Register a new file selection. Any earlier selection still being read becomes stale.
    pub fn begin_ingest(&mut self) -> IngestTicket {
        let ticket = IngestTicket {
            sequence: self.next_ingest,
            epoch: self.epoch,
        };
        self.next_ingest += 1;
        self.latest_ingest = Some(ticket);
        debug!("Ingestion started: {}", ticket);
        ticket
    }

    /// Bind an ingested image to the session and move to `Ready`.
    ///
    /// An edit still in flight is superseded; its response will be discarded.
    pub fn finish_ingest(&mut self, ticket: IngestTicket, image: ImageFile) -> Completion {
        if ticket.epoch != self.epoch || self.latest_ingest != Some(ticket) {
            debug!("Discarding stale ingestion {}", ticket);
            return Completion::Stale;
        }

        if let Some(superseded) = self.pending.take() {
            debug!("{} superseded by new image", superseded);
        }

        debug!("Image ingested: {} ({})", image.file_name, image.mime_type);
        self.latest_ingest = None;
        self.current_image = Some(Arc::new(image));
        self.last_result = None;
        self.last_error = None;
        self.current_prompt = DEFAULT_PROMPT.to_string();
        self.split = SplitPosition::default();
        self.phase = Phase::Ready;
        self.image_revision += 1;
        Completion::Applied
    }

    // ── Edit ────────────────────────────────────────────────────────────────────

    /// Set the prompt and start an edit with it in one step.
    ///
    /// The prompt is stored even when no edit can start.
    pub fn begin_edit_with_prompt(&mut self, prompt: impl Into<String>) -> Option<EditRequest> {
        self.set_prompt(prompt);
        self.begin_edit()
    }

    /// Move to `Processing` and build the request to send.
    ///
    /// Returns `None` without any state change when there is no image or an
    /// edit is already in flight.
    pub fn begin_edit(&mut self) -> Option<EditRequest> {
        if !self.can_generate() {
            debug!("Generate ignored in phase {:?}", self.phase);
            return None;
        }
        let source_image = self.current_image.clone()?;

        let id = RequestId::new(self.next_request);
        self.next_request += 1;
        self.pending = Some(id);
        self.last_error = None;
        if self.last_result.take().is_some() {
            self.image_revision += 1;
        }
        self.phase = Phase::Processing;
        debug!("{} started with prompt {:?}", id, self.current_prompt);

        Some(EditRequest {
            id,
            source_image,
            prompt: self.current_prompt.clone(),
        })
    }

    /// Apply the outcome of the remote call for `id`.
    ///
    /// Success moves to `Complete`; failure reverts to `Ready` with the
    /// failure's message. Outcomes for any other request are discarded.
    pub fn finish_edit(&mut self, id: RequestId, outcome: Result<EditedImage, EditError>) -> Completion {
        if self.pending != Some(id) {
            debug!("Discarding stale response for {}", id);
            return Completion::Stale;
        }
        self.pending = None;

        match outcome {
            Ok(image) => {
                debug!("{} complete", id);
                self.last_result = Some(image);
                self.split = SplitPosition::default();
                self.phase = Phase::Complete;
                self.image_revision += 1;
            }
            Err(e) => {
                debug!("{} failed: {}", id, e);
                self.last_error = Some(e.user_message());
                self.phase = Phase::Ready;
            }
        }
        Completion::Applied
    }

    // ── Reset / view ────────────────────────────────────────────────────────────

    /// Return to `Idle` from any phase. Work still in flight becomes stale.
    pub fn reset(&mut self) {
        debug!("Session reset from {:?}", self.phase);
        self.epoch += 1;
        self.phase = Phase::Idle;
        self.current_image = None;
        self.last_result = None;
        self.last_error = None;
        self.pending = None;
        self.latest_ingest = None;
        self.current_prompt = DEFAULT_PROMPT.to_string();
        self.split = SplitPosition::default();
        self.image_revision += 1;
    }

    /// Move the comparison slider.
    pub fn set_split(&mut self, split: SplitPosition) {
        self.split = split;
    }

    /// The result to export, only while the session shows a completed edit.
    pub fn exportable_result(&self) -> Option<&EditedImage> {
        match self.phase {
            Phase::Complete => self.last_result.as_ref(),
            _ => None,
        }
    }

    /// Read model without the image URIs.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            prompt: self.current_prompt.clone(),
            file_name: self.current_image.as_ref().map(|i| i.file_name.clone()),
            error: self.last_error.clone(),
            split_position: self.split.percent(),
            can_generate: self.can_generate(),
            can_export: self.exportable_result().is_some(),
            image_revision: self.image_revision,
            images: None,
        }
    }

    /// Read model including the image URIs.
    pub fn full_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            images: Some(SessionImages {
                original: self.current_image.as_ref().map(|i| i.preview.clone()),
                result: self.exportable_result().map(|r| r.data_uri.clone()),
            }),
            ..self.snapshot()
        }
    }
}
