//! Image IO and the remote edit client.
//!
//! - [`ingest`]: file selection to [`ImageFile`](crate::core::ImageFile)
//! - [`gemini`]: the model API client behind [`ImageEditor`]
//! - [`export`]: writing results to disk

pub mod export;
pub mod gemini;
pub mod ingest;

pub use export::{STAGED_FILE_NAME, export_result, stage_full_image, stage_into, write_result_png};
pub use gemini::{GeminiClient, ImageEditor};
pub use ingest::{build_image_file, ingest_path, ingest_upload};
