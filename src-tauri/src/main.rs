// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// The application itself lives in the library so commands are registered
// from the crate that defines them.
fn main() -> anyhow::Result<()> {
    retouch_ai_lib::run()
}
