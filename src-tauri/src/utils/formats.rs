use std::path::Path;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::ImageFormat;

/// Prefix every accepted upload's content type must carry
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// Container the edited image is always framed as for display and export
pub const RESULT_MIME_TYPE: &str = "image/png";

/// Check whether a declared content type names an image category
pub fn is_image_mime(content_type: &str) -> bool {
    content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with(IMAGE_MIME_PREFIX)
}

/// Detect the mime type of raw bytes from their magic number
pub fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|format| format.to_mime_type())
}

/// Get the declared mime type for a path from its extension
pub fn mime_from_path(path: &Path) -> Option<&'static str> {
    ImageFormat::from_path(path).ok().map(|format| format.to_mime_type())
}

/// Build a `data:` URI from a mime type and a base64 payload
pub fn to_data_uri(mime_type: &str, base64_data: &str) -> String {
    format!("data:{mime_type};base64,{base64_data}")
}

/// Remove a `data:...;base64,` prefix, returning the raw base64 payload
pub fn strip_data_uri_prefix(encoded: &str) -> &str {
    match encoded.split_once("base64,") {
        Some((_, payload)) => payload,
        None => encoded,
    }
}

/// Decode a data URI or bare base64 string into bytes
pub fn decode_base64_payload(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    BASE64.decode(strip_data_uri_prefix(encoded).trim())
}

/// Encode bytes as standard base64
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}
