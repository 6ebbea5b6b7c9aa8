//! Tracing subscriber setup for the command-line tool

use anyhow::{Result, anyhow};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over the configured level. `verbose` raises
/// the configured level to `debug`. Output goes to stderr so query results on
/// stdout stay clean.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { config.level.as_str() };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("geolookup={level}")));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.format == "json" {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    installed.map_err(|e| anyhow!("Failed to initialize logging: {e}"))?;

    debug!("Logging initialized at level: {}", level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_initialization_fails() {
        let config = LoggingConfig::default();
        // Another test may already own the global subscriber
        let _ = init_logging(&config, false);
        assert!(init_logging(&config, true).is_err());
    }
}
