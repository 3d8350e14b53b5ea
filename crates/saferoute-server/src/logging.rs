//! Tracing subscriber setup.

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

/// Install the global subscriber. `RUST_LOG` is honored on top of the
/// crate-level debug directives.
pub fn init(format: LogFormat) -> Result<()> {
    let filter = EnvFilter::from_default_env()
        .add_directive("saferoute_server=debug".parse()?)
        .add_directive("saferoute_core=debug".parse()?);

    let (pretty, json) = match format {
        LogFormat::Pretty => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .try_init()
        .context("Failed to install tracing subscriber")
}
