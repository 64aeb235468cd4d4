//! HTTP transport - maps JSON requests onto the car service.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /car/:id` - one car, 404 when absent, 400 when the id is empty.
//! - `GET /cars` - every car, 404 `no data` when the store is empty.
//! - `POST /create` - save a new car, 201 with the assigned id.
//! - `PUT /update` - replace an existing car.
//! - `GET /health` - liveness, `{ "status": "UP" }`.
//! - `GET /metrics` - counters and latency histograms, Prometheus text.
//!
//! Success bodies are `{message, data}`, failures `{message, err}`.
//!
//! ## Example
//!
//! ```ignore
//! use cars::{http, InMemoryCarRepository, RepositoryService};
//!
//! let state = http::AppState::new(RepositoryService::new(InMemoryCarRepository::new()));
//! http::serve(state, "localhost:9000").await?;
//! ```

mod handlers;
mod response;
mod state;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post, put};
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::{watch, Notify};

pub use response::{
    ApiError, ErrorResponse, HealthResponse, SuccessResponse, CAR_CREATED, CAR_UPDATED,
};
pub use state::AppState;

/// Build the axum `Router` for the car API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/car", get(handlers::get_car_without_id))
        .route("/car/", get(handlers::get_car_without_id))
        .route("/car/:id", get(handlers::get_car))
        .route("/cars", get(handlers::get_cars))
        .route("/create", post(handlers::create_car))
        .route("/update", put(handlers::update_car))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(middleware::map_response(handlers::allow_any_origin))
        .with_state(state)
}

/// Serve the API at the given address (e.g. `"localhost:9000"`) until the
/// process exits.
pub async fn serve(state: AppState, addr: &str) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await
}

/// Serve the API on `listener` until `signal` resolves, then stop accepting
/// connections and wait at most `drain` for in-flight requests.
///
/// Requests still running when the window closes are answered with 503 and
/// their connections closed; the server task is aborted before returning.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: AppState,
    signal: F,
    drain: Duration,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let shutdown = Arc::new(Notify::new());
    let trigger = shutdown.clone();
    let (stop, stopped) = watch::channel(false);

    let app = router(state).layer(middleware::from_fn_with_state(
        stopped,
        handlers::cut_off_when_stopped,
    ));
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move { trigger.notified().await });
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        joined = &mut server => return joined.map_err(std::io::Error::other)?,
        _ = signal => {}
    }

    tracing::info!(drain_secs = drain.as_secs(), "shutdown signal received, draining");
    shutdown.notify_one();

    match tokio::time::timeout(drain, &mut server).await {
        Ok(joined) => joined.map_err(std::io::Error::other)?,
        Err(_) => {
            tracing::warn!("drain window elapsed with requests still in flight");
            let _ = stop.send(true);
            server.abort();
            Ok(())
        }
    }
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received interrupt"),
        _ = terminate => tracing::info!("received terminate"),
    }
}
