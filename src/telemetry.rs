//! Tracing subscriber set-up shared by every binary.

use tracing_subscriber::{fmt as tfmt, EnvFilter};

/// Install the global subscriber: `RUST_LOG` filter (default `info`), UTC
/// RFC 3339 timestamps, target names on. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .try_init();
}
