//! # Logging Setup
//!
//! Installs the `tracing` subscriber used by applications embedding the
//! client.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,bistro_client=debug,reqwest=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bistro_client=trace` - Trace the client only
/// - Default: `default_filter`, or [`DEFAULT_FILTER`] when `None`
///
/// Returns false if a global subscriber was already installed, which
/// makes repeated calls (tests, embedding apps) harmless.
pub fn init(default_filter: Option<&str>) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter.unwrap_or(DEFAULT_FILTER)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init(Some("warn"));
        assert!(!init(None));
    }
}
