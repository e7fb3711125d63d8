//! Tauri command handlers for the frontend.
//!
//! - [`session`]: ingestion, prompt, generate, reset and slider commands
//! - [`export`]: download and open-full actions on the edited result
//!
//! Every applied transition is pushed to the webview as a
//! [`SESSION_CHANGED_EVENT`] carrying the new snapshot.

mod export;
mod session;

use tauri::{AppHandle, Emitter};
use tracing::warn;

use crate::core::{SessionListener, SessionSnapshot};

pub use export::*;
pub use session::*;

/// Event name carrying a `SessionSnapshot` after every transition
pub const SESSION_CHANGED_EVENT: &str = "session-changed";

/// Forwards session snapshots to the webview.
pub struct SessionEvents(pub AppHandle);

impl SessionListener for SessionEvents {
    fn session_changed(&self, snapshot: &SessionSnapshot) {
        if let Err(e) = self.0.emit(SESSION_CHANGED_EVENT, snapshot) {
            warn!("Failed to emit {}: {}", SESSION_CHANGED_EVENT, e);
        }
    }
}
