// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod processing;
#[cfg(feature = "desktop")]
pub mod commands;
#[cfg(feature = "desktop")]
mod app;

// Public exports for external consumers
pub use core::{AppConfig, AppState, EditSession, ImageFile, Phase, SessionListener, SessionSnapshot};
pub use processing::{GeminiClient, ImageEditor};
pub use utils::{EditError, IngestError, RetouchError, RetouchResult};
#[cfg(feature = "desktop")]
pub use app::run;

// Everything outside `commands` and `app` is usable as a plain library
// without the webview stack.
