// src/logging.rs
// =============================================================================
// Sets up `tracing` so log lines go to stdout with a timestamp, e.g.
//
//   2024-05-01T10:15:42.123456Z  INFO More button not found
//
// The level defaults to `info` and can be changed with RUST_LOG
// (RUST_LOG=debug shows click counts and browser session events).
// =============================================================================

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("build log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stdout)
        .try_init()
        .map_err(|e| anyhow!("initialize tracing subscriber: {}", e))?;

    Ok(())
}
