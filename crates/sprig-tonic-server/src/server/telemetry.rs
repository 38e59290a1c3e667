//! Logging setup for the server binary.
//!
//! Installs a `tracing` subscriber with an environment-driven filter and a
//! human-readable fmt layer. The filter honors `RUST_LOG` and falls back to
//! `info` when unset.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_telemetry() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
