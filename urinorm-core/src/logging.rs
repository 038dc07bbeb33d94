use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging system with JSON formatting and environment-based
/// filtering.
///
/// Uses environment variables for log level filtering (defaults to "info"
/// if not set) and flattens event fields for cleaner log output. Meant for
/// binaries embedding the engine; the library itself only emits spans and
/// events.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .init();
}
