//! Remote image editing through the Gemini `generateContent` API.

mod client;
mod response;
pub mod types;

pub use client::{GeminiClient, ImageEditor};
pub use response::{NO_CANDIDATES, NO_IMAGE, parse_edit_response, service_error};
