use std::path::{Path, PathBuf};
use tokio::fs;
use crate::utils::{RetouchError, RetouchResult};

/// Prefix of every exported result file
pub const EXPORT_FILE_PREFIX: &str = "retouch-ai";

/// File name for an export taken at `epoch_millis`
pub fn export_file_name(epoch_millis: i64) -> String {
    format!("{EXPORT_FILE_PREFIX}-{epoch_millis}.png")
}

/// Write bytes to `dir/file_name`, creating the directory if needed
pub async fn write_into_dir(dir: &Path, file_name: &str, bytes: &[u8]) -> RetouchResult<PathBuf> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| RetouchError::export(format!("Cannot create '{}': {}", dir.display(), e)))?;

    let path = dir.join(file_name);
    fs::write(&path, bytes)
        .await
        .map_err(|e| RetouchError::export(format!("Cannot write '{}': {}", path.display(), e)))?;

    Ok(path)
}

/// Extract the file name component of a path for display
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
