//! Command-line configuration for the `cars` server.

use std::fmt;
use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "cars", version, about = "In-memory car inventory over HTTP")]
pub struct Config {
    /// Address for the HTTP (JSON) server
    #[arg(
        long = "http-addr",
        alias = "http.addr",
        env = "CARS_HTTP_ADDR",
        default_value = "localhost:9000"
    )]
    pub http_addr: String,

    /// Log filter directive, e.g. `info` or `cars=debug,tower=warn`
    #[arg(long, env = "CARS_LOG", default_value = "info")]
    pub log_level: String,

    /// Seconds to wait for in-flight requests after a shutdown signal
    #[arg(long = "shutdown-timeout", default_value_t = 30)]
    pub shutdown_timeout_secs: u64,
}

impl Config {
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
