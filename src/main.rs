use std::fmt;
use std::process::ExitCode;

use cars::config::{Config, ConfigError};
use cars::{http, logging, InMemoryCarRepository, RepositoryService};
use clap::Parser;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();
    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Why the server stopped early.
#[derive(Debug)]
enum RunError {
    Config(ConfigError),
    Bind {
        addr: String,
        source: std::io::Error,
    },
    Serve(std::io::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Config(e) => write!(f, "{}", e),
            RunError::Bind { addr, source } => write!(f, "cannot listen on {}: {}", addr, source),
            RunError::Serve(e) => write!(f, "http server error: {}", e),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Config(e) => Some(e),
            RunError::Bind { source, .. } => Some(source),
            RunError::Serve(e) => Some(e),
        }
    }
}

impl From<ConfigError> for RunError {
    fn from(err: ConfigError) -> Self {
        RunError::Config(err)
    }
}

async fn run(config: Config) -> Result<(), RunError> {
    logging::init_tracing(&config)?;

    let repo = InMemoryCarRepository::new();
    let state = http::AppState::new(RepositoryService::new(repo));

    let bind_error = |source| RunError::Bind {
        addr: config.http_addr.clone(),
        source,
    };
    let listener = TcpListener::bind(&config.http_addr)
        .await
        .map_err(bind_error)?;
    let local = listener.local_addr().map_err(bind_error)?;
    tracing::info!(addr = %local, version = env!("CARGO_PKG_VERSION"), "starting cars server");

    http::serve_with_shutdown(
        listener,
        state,
        http::shutdown_signal(),
        config.shutdown_timeout(),
    )
    .await
    .map_err(RunError::Serve)?;

    tracing::info!("server closed");
    Ok(())
}
