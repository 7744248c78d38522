//! Tracing setup for the trivia CLI
//!
//! Usage:
//!   trivia --debug serve              # Debug logging to console
//!   RUST_LOG=trivia_server=debug ...  # Fine-grained log control

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Default filter when RUST_LOG is unset. `tower_http` at debug shows one
/// line per request from the trace layer.
fn default_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info,tower_http=debug,sqlx=warn")
    }
}

/// Initialize console tracing. RUST_LOG, when set, wins over `debug`.
pub fn init(debug: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(debug));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
