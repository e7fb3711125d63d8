use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "retouch_ai_lib=debug,retouch_ai=debug,info";

/// Initializes the global tracing subscriber.
///
/// Honors `RUST_LOG`; otherwise logs this crate at debug and everything else at info.
pub fn init_logging() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_target(false)       // Remove module path
        .with_ansi(true)
        .with_writer(std::io::stdout)
        .compact()
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {e}"))?;

    info!("Logging initialized");
    Ok(())
}
