//! Core application types and state management.
//!
//! - [`AppState`]: shared state managed by Tauri
//! - [`EditSession`]: the edit lifecycle state machine
//! - [`AppConfig`]: runtime configuration
//! - [`SplitPosition`]: before/after slider position

mod comparison;
mod config;
mod session;
mod state;
mod task;
mod types;

pub use comparison::{DragSample, SplitPosition};
pub use config::{AppConfig, DEFAULT_API_BASE, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
pub use session::{Completion, EditSession, DEFAULT_PROMPT, PROMPT_PRESETS};
pub use state::{AppState, SessionListener};
pub use task::{EditRequest, IngestTicket, RequestId};
pub use types::{EditResult, EditedImage, ImageFile, ImageUpload, Phase, SessionImages, SessionSnapshot};
