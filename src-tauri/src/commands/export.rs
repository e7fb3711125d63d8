use std::path::PathBuf;
use tauri::{AppHandle, Manager, State};
use tauri_plugin_opener::OpenerExt;
use tracing::debug;

use crate::core::AppState;
use crate::utils::{RetouchError, RetouchResult};

/// Saves the edited image and returns the written path.
///
/// Writes into `dir` when given, otherwise into the user's download directory.
#[tauri::command]
pub async fn export_result(
    app: AppHandle,
    state: State<'_, AppState>,
    dir: Option<String>,
) -> RetouchResult<String> {
    let dir = match dir {
        Some(dir) => PathBuf::from(dir),
        None => app
            .path()
            .download_dir()
            .map_err(|e| RetouchError::export(format!("No download directory: {e}")))?,
    };

    let path = state.export_result(&dir).await?;
    Ok(path.to_string_lossy().to_string())
}

/// Opens the full-size result in the system image viewer.
#[tauri::command]
pub async fn open_full_result(app: AppHandle, state: State<'_, AppState>) -> RetouchResult<()> {
    let path = state.stage_full_image().await?;
    debug!("Opening {}", path.display());

    app.opener()
        .open_path(path.to_string_lossy().to_string(), None::<&str>)
        .map_err(|e| RetouchError::export(format!("Failed to open result: {e}")))
}
