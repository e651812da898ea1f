//! Tracing subscriber setup.

use shopkit_core::Config;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Respects `RUST_LOG` when set, defaults to `info` otherwise. Production
/// environments get JSON output for log aggregation; everything else gets the
/// human-readable formatter.
pub fn init_telemetry(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
