//! Tracing setup for the wallet CLI.
//!
//! Logs go to stderr so that command output (acceptance line, inspect
//! summary) stays clean on stdout. `RUST_LOG` overrides the `level`
//! argument when set, e.g. `RUST_LOG=wisp_relay=trace`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `json` switches the stderr output from
/// human-readable lines to newline-delimited JSON.
///
/// # Panics
///
/// Panics if called twice in the same process.
pub fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let base = fmt::layer().with_writer(std::io::stderr).with_target(true);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(base.json())
            .init();
    } else {
        tracing_subscriber::registry().with(filter).with(base).init();
    }
}
