//! Drives `AppState` end to end with a scripted editor in place of the remote service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use retouch_ai_lib::core::{DEFAULT_PROMPT, DragSample, EditedImage, ImageUpload};
use retouch_ai_lib::utils::{IngestError, decode_base64_payload};
use retouch_ai_lib::{AppState, EditError, ImageEditor, Phase, RetouchError, SessionListener, SessionSnapshot};

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 7, 7, 7];
const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F', 0];

#[derive(Debug, Clone, PartialEq)]
struct Call {
    encoded_image: String,
    mime_type: String,
    prompt: String,
}

/// Replies with a fixed outcome and records every call.
struct ScriptedEditor {
    outcome: Result<EditedImage, EditError>,
    calls: Mutex<Vec<Call>>,
    /// When set, each call signals `started` and waits for `release`
    gated: bool,
    started: Notify,
    release: Notify,
}

impl ScriptedEditor {
    fn new(outcome: Result<EditedImage, EditError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: Mutex::new(Vec::new()),
            gated: false,
            started: Notify::new(),
            release: Notify::new(),
        })
    }

    fn gated(outcome: Result<EditedImage, EditError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: Mutex::new(Vec::new()),
            gated: true,
            started: Notify::new(),
            release: Notify::new(),
        })
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageEditor for ScriptedEditor {
    async fn submit_edit(
        &self,
        encoded_image: &str,
        mime_type: &str,
        prompt: &str,
    ) -> Result<EditedImage, EditError> {
        self.calls.lock().unwrap().push(Call {
            encoded_image: encoded_image.to_string(),
            mime_type: mime_type.to_string(),
            prompt: prompt.to_string(),
        });
        if self.gated {
            self.started.notify_one();
            self.release.notified().await;
        }
        self.outcome.clone()
    }
}

#[derive(Default)]
struct RecordingListener(Mutex<Vec<SessionSnapshot>>);

impl SessionListener for RecordingListener {
    fn session_changed(&self, snapshot: &SessionSnapshot) {
        self.0.lock().unwrap().push(snapshot.clone());
    }
}

fn edited(data: &str) -> EditedImage {
    EditedImage {
        data_uri: format!("data:image/png;base64,{data}"),
    }
}

fn upload(name: &str, content_type: &str, bytes: &[u8]) -> ImageUpload {
    ImageUpload {
        file_name: name.to_string(),
        content_type: content_type.to_string(),
        bytes: bytes.to_vec(),
    }
}

async fn ready_state(editor: Arc<ScriptedEditor>) -> AppState {
    let state = AppState::with_editor(editor);
    state
        .ingest_upload(upload("portrait.png", "image/png", PNG_BYTES))
        .await
        .unwrap();
    state
}

#[tokio::test]
async fn ingested_image_round_trips() {
    let state = AppState::with_editor(ScriptedEditor::new(Ok(edited("AAAA"))));
    let snapshot = state
        .ingest_upload(upload("portrait.png", "image/png", PNG_BYTES))
        .await
        .unwrap();

    assert_eq!(snapshot.phase, Phase::Ready);
    assert_eq!(snapshot.file_name.as_deref(), Some("portrait.png"));
    assert_eq!(snapshot.prompt, DEFAULT_PROMPT);
    assert!(snapshot.can_generate);

    let original = snapshot.original().unwrap();
    let payload = original.strip_prefix("data:image/png;base64,").unwrap();
    assert_eq!(decode_base64_payload(payload).unwrap(), PNG_BYTES);
}

#[tokio::test]
async fn non_image_leaves_session_unchanged() {
    let state = ready_state(ScriptedEditor::new(Ok(edited("AAAA")))).await;
    let before = state.snapshot().await;

    let err = state
        .ingest_upload(upload("notes.txt", "text/plain", b"hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, RetouchError::Ingest(IngestError::InvalidFileType(_))));

    let after = state.snapshot().await;
    assert_eq!(after.phase, before.phase);
    assert_eq!(after.file_name, before.file_name);
    assert_eq!(after.original(), before.original());
}

#[tokio::test]
async fn generate_without_image_makes_no_call() {
    let editor = ScriptedEditor::new(Ok(edited("AAAA")));
    let state = AppState::with_editor(editor.clone());

    let snapshot = state.generate().await;
    assert_eq!(snapshot.phase, Phase::Idle);
    assert!(editor.calls().is_empty());
}

#[tokio::test]
async fn success_moves_to_complete() {
    let editor = ScriptedEditor::new(Ok(edited("AAAA")));
    let state = ready_state(editor.clone()).await;

    let snapshot = state.generate().await;
    assert_eq!(snapshot.phase, Phase::Complete);
    assert_eq!(snapshot.result(), Some("data:image/png;base64,AAAA"));
    assert!(snapshot.can_export);
    assert!(snapshot.error.is_none());

    let calls = editor.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].mime_type, "image/png");
    assert_eq!(calls[0].prompt, DEFAULT_PROMPT);
}

#[tokio::test]
async fn failure_reverts_to_ready_with_message() {
    let refusal = EditError::Refusal("I cannot edit this image.".to_string());
    let state = ready_state(ScriptedEditor::new(Err(refusal))).await;

    let snapshot = state.generate().await;
    assert_eq!(snapshot.phase, Phase::Ready);
    assert_eq!(
        snapshot.error.as_deref(),
        Some("Model refused or replied with text: I cannot edit this image.")
    );
    assert!(snapshot.result().is_none());
    assert!(snapshot.can_generate);
}

#[tokio::test]
async fn regenerate_sends_original_image() {
    let editor = ScriptedEditor::new(Ok(edited("RESULT")));
    let state = ready_state(editor.clone()).await;

    state.generate().await;
    state.set_prompt("Smooth skin".to_string()).await;
    let snapshot = state.generate().await;
    assert_eq!(snapshot.phase, Phase::Complete);

    let calls = editor.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].encoded_image, calls[1].encoded_image);
    assert_ne!(calls[1].encoded_image, "RESULT");
    assert_eq!(calls[1].prompt, "Smooth skin");
}

#[tokio::test]
async fn empty_prompt_is_forwarded() {
    let editor = ScriptedEditor::new(Ok(edited("AAAA")));
    let state = ready_state(editor.clone()).await;

    state.set_prompt(String::new()).await;
    state.generate().await;
    assert_eq!(editor.calls()[0].prompt, "");
}

#[tokio::test]
async fn reset_returns_to_idle_from_complete() {
    let state = ready_state(ScriptedEditor::new(Ok(edited("AAAA")))).await;
    state.generate().await;
    state.set_prompt("custom".to_string()).await;

    let snapshot = state.reset().await;
    assert_eq!(snapshot.phase, Phase::Idle);
    assert!(snapshot.original().is_none());
    assert!(snapshot.result().is_none());
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.prompt, DEFAULT_PROMPT);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn response_after_reset_is_discarded() {
    let editor = ScriptedEditor::gated(Ok(edited("LATE")));
    let state = ready_state(editor.clone()).await;

    let task = tokio::spawn({
        let state = state.clone();
        async move { state.generate().await }
    });

    editor.started.notified().await;
    assert_eq!(state.snapshot().await.phase, Phase::Processing);
    state.reset().await;
    editor.release.notify_one();

    let snapshot = task.await.unwrap();
    assert_eq!(snapshot.phase, Phase::Idle);
    assert!(snapshot.result().is_none());
    assert_eq!(state.snapshot().await.phase, Phase::Idle);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn new_image_supersedes_in_flight_edit() {
    let editor = ScriptedEditor::gated(Ok(edited("LATE")));
    let state = ready_state(editor.clone()).await;

    let task = tokio::spawn({
        let state = state.clone();
        async move { state.generate().await }
    });

    editor.started.notified().await;
    state
        .ingest_upload(upload("second.jpg", "image/jpeg", JPEG_BYTES))
        .await
        .unwrap();
    editor.release.notify_one();
    task.await.unwrap();

    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.phase, Phase::Ready);
    assert_eq!(snapshot.file_name.as_deref(), Some("second.jpg"));
    assert!(snapshot.result().is_none());
}

#[tokio::test]
async fn generate_while_processing_is_ignored() {
    let editor = ScriptedEditor::gated(Ok(edited("AAAA")));
    let state = ready_state(editor.clone()).await;

    let task = tokio::spawn({
        let state = state.clone();
        async move { state.generate().await }
    });
    editor.started.notified().await;

    let snapshot = state.generate().await;
    assert_eq!(snapshot.phase, Phase::Processing);
    assert!(!snapshot.can_generate);

    editor.release.notify_one();
    assert_eq!(task.await.unwrap().phase, Phase::Complete);
    assert_eq!(editor.calls().len(), 1);
}

#[tokio::test]
async fn presets_and_slider_update_snapshot() {
    let state = ready_state(ScriptedEditor::new(Ok(edited("AAAA")))).await;

    let snapshot = state.apply_preset("Remove glasses").await;
    assert_eq!(snapshot.prompt, "Remove glasses");

    let snapshot = state.apply_preset("not a preset").await;
    assert_eq!(snapshot.prompt, "Remove glasses");

    let snapshot = state
        .drag_split(DragSample {
            pointer_x: 1000.0,
            container_left: 100.0,
            container_width: 400.0,
        })
        .await;
    assert_eq!(snapshot.split_position, 100.0);

    assert_eq!(state.prompt_presets().len(), 5);
}

#[tokio::test]
async fn listener_sees_every_applied_transition() {
    let listener = Arc::new(RecordingListener::default());
    let state = AppState::with_editor(ScriptedEditor::new(Ok(edited("AAAA"))))
        .with_listener(listener.clone());

    state
        .ingest_upload(upload("portrait.png", "image/png", PNG_BYTES))
        .await
        .unwrap();
    state.generate().await;

    let phases: Vec<Phase> = listener.0.lock().unwrap().iter().map(|s| s.phase).collect();
    assert_eq!(phases, vec![Phase::Ready, Phase::Processing, Phase::Complete]);
}

#[tokio::test]
async fn prompt_and_slider_updates_leave_images_out() {
    let listener = Arc::new(RecordingListener::default());
    let state = AppState::with_editor(ScriptedEditor::new(Ok(edited("AAAA"))))
        .with_listener(listener.clone());
    state
        .ingest_upload(upload("portrait.png", "image/png", PNG_BYTES))
        .await
        .unwrap();
    state.generate().await;

    let typed = state.set_prompt("Smooth skin".to_string()).await;
    assert!(typed.images.is_none());
    let dragged = state
        .drag_split(DragSample {
            pointer_x: 300.0,
            container_left: 100.0,
            container_width: 400.0,
        })
        .await;
    assert!(dragged.images.is_none());
    assert_eq!(dragged.image_revision, typed.image_revision);

    let events = listener.0.lock().unwrap().clone();
    let complete = events.iter().find(|s| s.phase == Phase::Complete).unwrap();
    assert_eq!(complete.result(), Some("data:image/png;base64,AAAA"));
    assert!(complete.original().is_some());
    assert!(events.last().unwrap().images.is_none());

    let full = state.snapshot().await;
    assert_eq!(full.result(), Some("data:image/png;base64,AAAA"));
    assert_eq!(full.split_position, 50.0);
}

#[tokio::test]
async fn generate_with_prompt_sends_that_prompt() {
    let editor = ScriptedEditor::new(Ok(edited("AAAA")));
    let state = ready_state(editor.clone()).await;

    state.set_prompt("old".to_string()).await;
    let snapshot = state.generate_with_prompt("Remove glasses".to_string()).await;

    assert_eq!(snapshot.phase, Phase::Complete);
    assert_eq!(snapshot.prompt, "Remove glasses");
    assert_eq!(editor.calls()[0].prompt, "Remove glasses");
}

#[tokio::test]
async fn export_writes_result_into_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let state = ready_state(ScriptedEditor::new(Ok(edited("iVBORw0KGgo=")))).await;

    let err = state.export_result(tmp.path()).await.unwrap_err();
    assert!(matches!(err, RetouchError::NothingToExport));

    state.generate().await;
    let path = state.export_result(tmp.path()).await.unwrap();

    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("retouch-ai-") && name.ends_with(".png"), "{name}");
    assert_eq!(&std::fs::read(&path).unwrap()[..4], &[0x89, b'P', b'N', b'G']);
}
