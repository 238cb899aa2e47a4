//! Tracing subscriber setup for hosts embedding the scanner.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,scanpay=debug";

/// Install a global tracing subscriber.
///
/// Honors `RUST_LOG`; otherwise falls back to [`DEFAULT_FILTER`]. Calling
/// this more than once is harmless, later calls are ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Tracing initialized");
    }
}
