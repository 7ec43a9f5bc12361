// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset: this crate at INFO, PDF and AWS
/// dependencies only at WARN.
const DEFAULT_FILTER: &str = "warn,futures_importer=info";

/// Installs the global tracing subscriber.
///
/// Log lines go to stderr; stdout is reserved for the import report.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    tracing::debug!("Logging setup complete.");
}
