pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;
pub mod logging;

pub use error::{
    EditError,
    IngestError,
    RetouchError,
    RetouchResult,
    GENERIC_EDIT_FAILURE,
    GENERIC_SESSION_FAILURE,
};
pub use validation::{validate_upload, validate_input_path};
pub use formats::{
    is_image_mime,
    sniff_mime_type,
    mime_from_path,
    to_data_uri,
    strip_data_uri_prefix,
    decode_base64_payload,
    encode_base64,
    IMAGE_MIME_PREFIX,
    RESULT_MIME_TYPE,
};
pub use fs::{export_file_name, write_into_dir, display_name};
pub use logging::init_logging;
