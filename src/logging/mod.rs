//! Diagnostic logging setup.
//!
//! Installs a `tracing` subscriber that writes to stderr so it never mixes
//! with the console transcript on stdout. `RUST_LOG` takes precedence over
//! the configured level.

use crate::config::LoggingConfig;
use anyhow::{anyhow, Result};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| config_filter(config))
}

/// Filter from the configured level alone; an unparsable level means `info`.
fn config_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init(config: &LoggingConfig) -> Result<()> {
    init_with_writer(config, std::io::stderr)
}

/// Install the subscriber with a custom writer. Fails if a global
/// subscriber is already set.
pub fn init_with_writer<W>(config: &LoggingConfig, writer: W) -> Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let layer = fmt::layer().compact().with_writer(writer).with_target(false);
    tracing_subscriber::registry()
        .with(build_env_filter(config))
        .with(layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))
}
