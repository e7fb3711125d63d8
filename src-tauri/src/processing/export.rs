//! Writes edited results to disk for download and full-size viewing.

use std::path::{Path, PathBuf};
use chrono::Utc;
use tracing::debug;

use crate::core::EditedImage;
use crate::utils::{
    RetouchError, RetouchResult, decode_base64_payload, export_file_name, write_into_dir,
};

/// File the open-full action hands to the system viewer
pub const STAGED_FILE_NAME: &str = "retouch-ai-full.png";

/// Writes `result` as `retouch-ai-<epoch-millis>.png` into `dir`.
pub async fn export_result(result: &EditedImage, dir: &Path) -> RetouchResult<PathBuf> {
    write_result_png(result, dir, Utc::now().timestamp_millis()).await
}

/// Writes `result` into the temp directory so it can be handed to the system viewer.
pub async fn stage_full_image(result: &EditedImage) -> RetouchResult<PathBuf> {
    stage_into(result, &std::env::temp_dir().join("retouch-ai")).await
}

/// Writes `result` as [`STAGED_FILE_NAME`] into `dir`, replacing the previous one.
pub async fn stage_into(result: &EditedImage, dir: &Path) -> RetouchResult<PathBuf> {
    write_decoded(result, dir, STAGED_FILE_NAME).await
}

/// Decodes the result's data URI and writes it under the timestamped name.
pub async fn write_result_png(
    result: &EditedImage,
    dir: &Path,
    epoch_millis: i64,
) -> RetouchResult<PathBuf> {
    write_decoded(result, dir, &export_file_name(epoch_millis)).await
}

async fn write_decoded(result: &EditedImage, dir: &Path, file_name: &str) -> RetouchResult<PathBuf> {
    let bytes = decode_base64_payload(&result.data_uri)
        .map_err(|e| RetouchError::export(format!("Result is not valid base64: {e}")))?;

    let path = write_into_dir(dir, file_name, &bytes).await?;
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}
