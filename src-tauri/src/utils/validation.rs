use std::path::Path;
use crate::utils::{IngestError, is_image_mime, mime_from_path};

/// Validates the declared type and content of an uploaded file
pub fn validate_upload(file_name: &str, content_type: &str, bytes: &[u8]) -> Result<(), IngestError> {
    if !is_image_mime(content_type) {
        return Err(IngestError::InvalidFileType(content_type.to_string()));
    }

    if bytes.is_empty() {
        return Err(IngestError::EmptyFile(file_name.to_string()));
    }

    Ok(())
}

/// Validates an input path and returns the image type declared by its extension
pub fn validate_input_path(path: &Path) -> Result<&'static str, IngestError> {
    // The extension check comes first so non-images are rejected without touching the disk
    let declared = mime_from_path(path).ok_or_else(|| {
        IngestError::InvalidFileType(
            path.extension()
                .map(|ext| ext.to_string_lossy().to_string())
                .unwrap_or_default(),
        )
    })?;

    if !path.exists() {
        return Err(IngestError::Io {
            path: path.to_path_buf(),
            reason: "file does not exist".to_string(),
        });
    }

    if !path.is_file() {
        return Err(IngestError::Io {
            path: path.to_path_buf(),
            reason: "path is not a file".to_string(),
        });
    }

    Ok(declared)
}
