fn main() {
    // The Tauri context (config, icons, Windows resources) is only needed for
    // the desktop binary.
    #[cfg(feature = "desktop")]
    tauri_build::build()
}
