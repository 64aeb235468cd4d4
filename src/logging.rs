use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError};

pub fn init_tracing(config: &Config) -> Result<(), ConfigError> {
    let filter = build_filter(&config.log_level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| ConfigError::Invalid(format!("tracing already initialised: {e}")))
}

fn build_filter(level: &str) -> Result<EnvFilter, ConfigError> {
    let level = level.trim();
    let level = if level.is_empty() { "info" } else { level };
    EnvFilter::try_new(level).map_err(|e| ConfigError::Invalid(format!("invalid log level: {e}")))
}
