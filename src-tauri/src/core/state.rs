//! Application state shared by all command handlers.
//!
//! `AppState` owns the [`EditSession`] and drives its asynchronous work. The
//! session lock is held only while transitioning: file reads and remote calls
//! run unlocked, and their completions are applied afterwards by identity.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::core::comparison::{DragSample, SplitPosition};
use crate::core::config::AppConfig;
use crate::core::session::{Completion, EditSession, PROMPT_PRESETS};
use crate::core::types::{ImageFile, ImageUpload, SessionSnapshot};
use crate::core::task::{EditRequest, IngestTicket};
use crate::processing::{self, GeminiClient, ImageEditor};
use crate::utils::{RetouchError, RetouchResult, validate_input_path, validate_upload};

/// Receives the session read model after every applied transition.
pub trait SessionListener: Send + Sync {
    fn session_changed(&self, snapshot: &SessionSnapshot);
}

#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<EditSession>>,
    editor: Arc<dyn ImageEditor>,
    listener: Option<Arc<dyn SessionListener>>,
}

impl AppState {
    /// Creates the state with a Gemini client built from `config`.
    pub fn new(config: AppConfig) -> Self {
        if !config.has_credential() {
            warn!("No API key configured; edits will fail until one is provided");
        }
        debug!("Using {:?}", config);
        Self::with_editor(Arc::new(GeminiClient::new(config)))
    }

    /// Creates the state around any editor implementation.
    pub fn with_editor(editor: Arc<dyn ImageEditor>) -> Self {
        Self {
            session: Arc::new(Mutex::new(EditSession::new())),
            editor,
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: Arc<dyn SessionListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Full read model, images included.
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.full_snapshot()
    }

    /// Runs `f` under the lock and publishes the resulting snapshot.
    async fn transition<T>(&self, f: impl FnOnce(&mut EditSession) -> T) -> (T, SessionSnapshot) {
        let (value, snapshot) = {
            let mut session = self.session.lock().await;
            let revision = session.image_revision();
            let value = f(&mut *session);
            (value, read_model(&session, revision))
        };
        self.publish(&snapshot);
        (value, snapshot)
    }

    fn publish(&self, snapshot: &SessionSnapshot) {
        if let Some(listener) = &self.listener {
            listener.session_changed(snapshot);
        }
    }

    // ── Ingestion ───────────────────────────────────────────────────────────────

    /// Ingests a file uploaded from the frontend.
    ///
    /// Invalid uploads are rejected before the session learns about them.
    pub async fn ingest_upload(&self, upload: ImageUpload) -> RetouchResult<SessionSnapshot> {
        validate_upload(&upload.file_name, &upload.content_type, &upload.bytes)?;
        let ticket = self.session.lock().await.begin_ingest();
        let image = processing::ingest_upload(upload).await?;
        Ok(self.bind_ingested(ticket, image).await)
    }

    /// Ingests a file from disk, e.g. one dropped onto the window.
    pub async fn ingest_path(&self, path: &Path) -> RetouchResult<SessionSnapshot> {
        validate_input_path(path)?;
        let ticket = self.session.lock().await.begin_ingest();
        let image = processing::ingest_path(path).await?;
        Ok(self.bind_ingested(ticket, image).await)
    }

    async fn bind_ingested(&self, ticket: IngestTicket, image: ImageFile) -> SessionSnapshot {
        let file_name = image.file_name.clone();
        let mut session = self.session.lock().await;
        match session.finish_ingest(ticket, image) {
            Completion::Applied => {
                info!("Loaded '{}'", file_name);
                let snapshot = session.full_snapshot();
                drop(session);
                self.publish(&snapshot);
                snapshot
            }
            Completion::Stale => session.snapshot(),
        }
    }

    // ── Prompt ──────────────────────────────────────────────────────────────────

    pub async fn set_prompt(&self, prompt: String) -> SessionSnapshot {
        self.transition(|session| session.set_prompt(prompt)).await.1
    }

    pub fn prompt_presets(&self) -> Vec<String> {
        PROMPT_PRESETS.iter().map(|p| p.to_string()).collect()
    }

    /// Replaces the prompt with a preset. Unknown presets leave the session unchanged.
    pub async fn apply_preset(&self, preset: &str) -> SessionSnapshot {
        let (applied, snapshot) = self.transition(|session| session.apply_preset(preset)).await;
        if !applied {
            warn!("Unknown prompt preset {:?}", preset);
        }
        snapshot
    }

    // ── Edit ────────────────────────────────────────────────────────────────────

    /// Runs one edit of the current image with the stored prompt.
    ///
    /// A no-op when there is no image or an edit is already running. Edit
    /// failures are folded into the session and never returned as errors.
    pub async fn generate(&self) -> SessionSnapshot {
        self.run_edit(|session| session.begin_edit()).await
    }

    /// Runs one edit with `prompt`, stored in the same transition that starts the edit.
    pub async fn generate_with_prompt(&self, prompt: String) -> SessionSnapshot {
        self.run_edit(move |session| session.begin_edit_with_prompt(prompt))
            .await
    }

    async fn run_edit(
        &self,
        begin: impl FnOnce(&mut EditSession) -> Option<EditRequest>,
    ) -> SessionSnapshot {
        let (request, snapshot) = self.transition(begin).await;
        let Some(request) = request else {
            return snapshot;
        };

        info!("Starting {} for '{}'", request.id, request.source_image.file_name);
        let image = &request.source_image;
        let outcome = self
            .editor
            .submit_edit(&image.encoded_data, &image.mime_type, &request.prompt)
            .await;

        match &outcome {
            Ok(_) => info!("{} returned an image", request.id),
            Err(e) => warn!("{} failed: {}", request.id, e),
        }

        let mut session = self.session.lock().await;
        let revision = session.image_revision();
        match session.finish_edit(request.id, outcome) {
            Completion::Applied => {
                let snapshot = read_model(&session, revision);
                drop(session);
                self.publish(&snapshot);
                snapshot
            }
            Completion::Stale => session.snapshot(),
        }
    }

    // ── Reset / view ────────────────────────────────────────────────────────────

    pub async fn reset(&self) -> SessionSnapshot {
        info!("Resetting session");
        self.transition(|session| session.reset()).await.1
    }

    /// Moves the comparison slider to follow the pointer.
    pub async fn drag_split(&self, sample: DragSample) -> SessionSnapshot {
        let split = SplitPosition::from(sample);
        self.transition(|session| session.set_split(split)).await.1
    }

    // ── Export ──────────────────────────────────────────────────────────────────

    /// Writes the completed result into `dir` and returns the written path.
    pub async fn export_result(&self, dir: &Path) -> RetouchResult<PathBuf> {
        let result = self
            .session
            .lock()
            .await
            .exportable_result()
            .cloned()
            .ok_or(RetouchError::NothingToExport)?;

        let path = processing::export_result(&result, dir).await?;
        info!("Exported result to {}", path.display());
        Ok(path)
    }

    /// Writes the completed result to a temp file for the system viewer.
    pub async fn stage_full_image(&self) -> RetouchResult<PathBuf> {
        let result = self
            .session
            .lock()
            .await
            .exportable_result()
            .cloned()
            .ok_or(RetouchError::NothingToExport)?;

        processing::stage_full_image(&result).await
    }
}

/// Light snapshot, or a full one when the images changed since `revision`.
fn read_model(session: &EditSession, revision: u64) -> SessionSnapshot {
    if session.image_revision() == revision {
        session.snapshot()
    } else {
        session.full_snapshot()
    }
}
