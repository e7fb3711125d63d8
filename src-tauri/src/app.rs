//! Desktop shell: plugins, command registration and window setup.

use std::sync::Arc;

use anyhow::Context;
use tauri::Manager;
use tracing::{debug, info, warn};

use crate::commands::{self, SessionEvents};
use crate::core::{AppConfig, AppState};
use crate::utils::init_logging;

// Import the window-vibrancy crate only on macOS
#[cfg(target_os = "macos")]
use window_vibrancy::{NSVisualEffectMaterial, apply_vibrancy};

/// Builds and runs the Tauri application until the last window closes.
pub fn run() -> anyhow::Result<()> {
    if let Err(e) = init_logging() {
        eprintln!("{e}");
    }

    info!("=== Application Starting ===");

    let config = AppConfig::from_env();
    if !config.has_credential() {
        warn!("API_KEY is not set; image edits will fail");
    }

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_opener::init())
        .invoke_handler(tauri::generate_handler![
            commands::get_session,
            commands::ingest_image,
            commands::ingest_path,
            commands::choose_image,
            commands::set_prompt,
            commands::list_prompt_presets,
            commands::apply_prompt_preset,
            commands::generate_edit,
            commands::reset_session,
            commands::drag_split,
            commands::export_result,
            commands::open_full_result,
        ])
        .setup(move |app| {
            let events = SessionEvents(app.handle().clone());
            app.manage(AppState::new(config).with_listener(Arc::new(events)));
            debug!("✓ AppState initialized");

            #[cfg(target_os = "macos")]
            {
                if let Some(window) = app.get_webview_window("main") {
                    info!("Applying vibrancy effect for macOS");
                    // Requires macOSPrivateApi=true in tauri.conf.json
                    if let Err(e) = apply_vibrancy(&window, NSVisualEffectMaterial::HudWindow, None, None) {
                        warn!("Failed to apply vibrancy effect: {}", e);
                    }
                }
            }

            Ok(())
        })
        .build(tauri::generate_context!())
        .context("error while building tauri application")?;

    info!("Starting application event loop...");
    app.run(|_app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            info!("Application exiting");
        }
    });
    Ok(())
}
