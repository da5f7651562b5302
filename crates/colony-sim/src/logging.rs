//! Diagnostic logging for the harness.
//!
//! The library crates log through the `log` facade. This module installs a
//! `tracing-subscriber` registry that picks those records up and writes
//! them to stderr, so stdout stays reserved for command output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "warn,colony_core=info,colony_sim=info";

/// Install the subscriber. Reads `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`] when it is unset or unparsable.
///
/// ```bash
/// RUST_LOG=colony_core=debug colony-sim turn --count 5
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
