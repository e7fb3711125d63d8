use std::path::PathBuf;
use tauri::{AppHandle, State};
use tauri_plugin_dialog::DialogExt;
use tokio::sync::oneshot;
use tracing::debug;

use crate::core::{AppState, DragSample, ImageUpload, SessionSnapshot};
use crate::utils::{RetouchError, RetouchResult};

/// Extensions offered by the native file picker
const PICKER_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "webp", "gif", "bmp", "tif", "tiff"];

#[tauri::command]
pub async fn get_session(state: State<'_, AppState>) -> RetouchResult<SessionSnapshot> {
    Ok(state.snapshot().await)
}

/// Ingests a file picked through the webview's file input.
#[tauri::command]
pub async fn ingest_image(
    state: State<'_, AppState>,
    upload: ImageUpload,
) -> RetouchResult<SessionSnapshot> {
    debug!("Received ingest_image for '{}' ({} bytes)", upload.file_name, upload.bytes.len());
    state.ingest_upload(upload).await
}

/// Ingests a file dropped onto the window.
#[tauri::command]
pub async fn ingest_path(state: State<'_, AppState>, path: String) -> RetouchResult<SessionSnapshot> {
    debug!("Received ingest_path for {}", path);
    state.ingest_path(&PathBuf::from(path)).await
}

/// Opens the native picker and ingests the selection.
///
/// Cancelling the picker returns the unchanged session.
#[tauri::command]
pub async fn choose_image(app: AppHandle, state: State<'_, AppState>) -> RetouchResult<SessionSnapshot> {
    let (tx, rx) = oneshot::channel();
    app.dialog()
        .file()
        .add_filter("Images", &PICKER_EXTENSIONS)
        .pick_file(move |picked| {
            let _ = tx.send(picked);
        });

    let picked = rx
        .await
        .map_err(|_| RetouchError::task("File picker closed unexpectedly"))?;
    let Some(picked) = picked else {
        debug!("File picker cancelled");
        return Ok(state.snapshot().await);
    };

    let path = picked
        .into_path()
        .map_err(|e| RetouchError::IO(e.to_string()))?;
    state.ingest_path(&path).await
}

#[tauri::command]
pub async fn set_prompt(state: State<'_, AppState>, prompt: String) -> RetouchResult<SessionSnapshot> {
    Ok(state.set_prompt(prompt).await)
}

#[tauri::command]
pub fn list_prompt_presets(state: State<'_, AppState>) -> Vec<String> {
    state.prompt_presets()
}

#[tauri::command]
pub async fn apply_prompt_preset(
    state: State<'_, AppState>,
    preset: String,
) -> RetouchResult<SessionSnapshot> {
    Ok(state.apply_preset(&preset).await)
}

/// Runs one edit. Resolves once the edit has finished; failures arrive in the snapshot.
///
/// A `prompt` given here replaces the stored one before the edit starts.
#[tauri::command]
pub async fn generate_edit(
    state: State<'_, AppState>,
    prompt: Option<String>,
) -> RetouchResult<SessionSnapshot> {
    Ok(match prompt {
        Some(prompt) => state.generate_with_prompt(prompt).await,
        None => state.generate().await,
    })
}

#[tauri::command]
pub async fn reset_session(state: State<'_, AppState>) -> RetouchResult<SessionSnapshot> {
    Ok(state.reset().await)
}

#[tauri::command]
pub async fn drag_split(
    state: State<'_, AppState>,
    sample: DragSample,
) -> RetouchResult<SessionSnapshot> {
    Ok(state.drag_split(sample).await)
}
