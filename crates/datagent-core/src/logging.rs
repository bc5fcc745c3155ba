//! Tracing subscriber setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;
use crate::error::{DatagentError, Result};

/// Build the filter: `RUST_LOG` when set, otherwise the configured level.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = &config.level;
    EnvFilter::try_new(level).map_err(|e| {
        let reason = format!("invalid level '{level}': {e}");
        DatagentError::Logging(reason)
    })
}

/// Install the global tracing subscriber, writing to stderr.
///
/// Fails if the filter is invalid or a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    result.map_err(|e| DatagentError::Logging(e.to_string()))
}
