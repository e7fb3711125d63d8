//! Turns user-selected files into [`ImageFile`]s.
//!
//! Validation runs before any read so rejected files have no side effects.
//! Base64 encoding runs on tokio's blocking pool to keep large photos off the
//! async workers.

use std::path::Path;
use tracing::{debug, warn};

use crate::core::{ImageFile, ImageUpload};
use crate::utils::{
    IngestError, RetouchError, RetouchResult, display_name, encode_base64, sniff_mime_type,
    to_data_uri, validate_input_path, validate_upload,
};

/// Ingests a file uploaded from the frontend.
pub async fn ingest_upload(upload: ImageUpload) -> RetouchResult<ImageFile> {
    let ImageUpload { file_name, content_type, bytes } = upload;
    validate_upload(&file_name, &content_type, &bytes)?;

    debug!("Encoding upload '{}' ({} bytes, declared {})", file_name, bytes.len(), content_type);
    encode_on_blocking_pool(file_name, content_type, bytes).await
}

/// Ingests a file from disk, e.g. one dropped onto the window.
pub async fn ingest_path(path: &Path) -> RetouchResult<ImageFile> {
    let declared = validate_input_path(path)?;
    let file_name = display_name(path);

    let bytes = tokio::fs::read(path).await.map_err(|e| IngestError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    if bytes.is_empty() {
        return Err(IngestError::EmptyFile(file_name).into());
    }

    debug!("Encoding '{}' ({} bytes, declared {})", file_name, bytes.len(), declared);
    encode_on_blocking_pool(file_name, declared.to_string(), bytes).await
}

async fn encode_on_blocking_pool(
    file_name: String,
    declared_mime: String,
    bytes: Vec<u8>,
) -> RetouchResult<ImageFile> {
    tokio::task::spawn_blocking(move || build_image_file(file_name, &declared_mime, bytes))
        .await
        .map_err(|e| RetouchError::task(format!("Encoding task panicked: {e}")))
}

/// Builds an [`ImageFile`] from already validated bytes.
///
/// The sniffed type wins over the declared one; formats the sniffer does not
/// know (e.g. SVG) keep the declared type.
pub fn build_image_file(file_name: String, declared_mime: &str, raw_bytes: Vec<u8>) -> ImageFile {
    let declared = declared_mime.trim().to_ascii_lowercase();
    let mime_type = match sniff_mime_type(&raw_bytes) {
        Some(sniffed) => {
            if sniffed != declared {
                warn!("'{}' declared as {} but looks like {}", file_name, declared, sniffed);
            }
            sniffed.to_string()
        }
        None => declared,
    };

    let encoded_data = encode_base64(&raw_bytes);
    let preview = to_data_uri(&mime_type, &encoded_data);

    ImageFile {
        file_name,
        raw_bytes,
        encoded_data,
        mime_type,
        preview,
    }
}
