//! Logging setup using `tracing-subscriber`.
//!
//! Logs go to stderr so stdout stays machine-readable JSON.

use std::io;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter: `RUST_LOG` when set, otherwise `level` for this crate
/// and `warn` for everything else.
pub fn build_env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,ogimage_core={level},ogimage_cli={level}")))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(level: &str) {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(build_env_filter(level))
        .with(layer)
        .try_init();
}
