use std::time::Instant;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio::sync::watch;

use super::response::{ApiError, HealthResponse, SuccessResponse, CAR_CREATED, CAR_UPDATED};
use super::state::AppState;
use crate::car::Car;

type Body = Result<Bytes, BytesRejection>;

/// `GET /car/:id`
pub(super) async fn get_car(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let start = Instant::now();
    let result = find_car(&state, &id);
    finish(&state, "/car", &id, start, result)
}

/// `GET /car` and `GET /car/` carry no id.
pub(super) async fn get_car_without_id(State(state): State<AppState>) -> Response {
    finish(&state, "/car", "", Instant::now(), Err(ApiError::EmptyId))
}

/// `GET /cars`
pub(super) async fn get_cars(State(state): State<AppState>) -> Response {
    let start = Instant::now();
    let cars = state.service().get_cars();
    let result = if cars.is_empty() {
        Err(ApiError::NoData)
    } else {
        Ok((StatusCode::OK, Json(SuccessResponse::data(cars))).into_response())
    };
    finish(&state, "/cars", "", start, result)
}

/// `POST /create`
pub(super) async fn create_car(State(state): State<AppState>, body: Body) -> Response {
    let start = Instant::now();
    let mut car_label = String::new();
    let result = create(&state, body, &mut car_label);
    finish(&state, "/create", &car_label, start, result)
}

/// `PUT /update`
pub(super) async fn update_car(State(state): State<AppState>, body: Body) -> Response {
    let start = Instant::now();
    let mut car_label = String::new();
    let result = update(&state, body, &mut car_label);
    finish(&state, "/update", &car_label, start, result)
}

/// `GET /health`
pub(super) async fn health() -> Json<HealthResponse> {
    tracing::debug!("checking application health");
    Json(HealthResponse {
        status: "UP".to_string(),
    })
}

/// `GET /metrics`
pub(super) async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics().render(),
    )
}

pub(super) async fn allow_any_origin(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

/// Answers 503 for requests still running once the server stops draining.
pub(super) async fn cut_off_when_stopped(
    State(mut stopped): State<watch::Receiver<bool>>,
    request: Request,
    next: Next,
) -> Response {
    let already_stopped = *stopped.borrow_and_update();
    if already_stopped {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }

    tokio::select! {
        response = next.run(request) => response,
        _ = stopped.changed() => {
            tracing::warn!("request cut off after the drain window");
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
    }
}

fn find_car(state: &AppState, id: &str) -> Result<Response, ApiError> {
    if id.is_empty() {
        return Err(ApiError::EmptyId);
    }
    let car = state.service().get_car(id).map_err(ApiError::Lookup)?;
    Ok((StatusCode::OK, Json(SuccessResponse::data(car))).into_response())
}

fn create(state: &AppState, body: Body, car_label: &mut String) -> Result<Response, ApiError> {
    let car = decode_car(body)?;
    car_label.clone_from(&car.id);
    let car = state.service().create(car).map_err(ApiError::CreateFailed)?;
    car_label.clone_from(&car.id);
    tracing::info!(car = %car.id, make = %car.make, model = %car.model, "car created");
    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::with_message(CAR_CREATED, car)),
    )
        .into_response())
}

fn update(state: &AppState, body: Body, car_label: &mut String) -> Result<Response, ApiError> {
    let car = decode_car(body)?;
    car_label.clone_from(&car.id);
    let car = state.service().update(car).map_err(ApiError::UpdateFailed)?;
    tracing::info!(car = %car.id, "car updated");
    Ok((
        StatusCode::OK,
        Json(SuccessResponse::with_message(CAR_UPDATED, car)),
    )
        .into_response())
}

fn decode_car(body: Body) -> Result<Car, ApiError> {
    let bytes = body.map_err(|e| ApiError::UnreadableBody(e.body_text()))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::MalformedBody(e.to_string()))
}

/// Count and log a failure, then time the response.
fn finish(
    state: &AppState,
    endpoint: &'static str,
    car: &str,
    start: Instant,
    result: Result<Response, ApiError>,
) -> Response {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            state.metrics().incr(err.counter(), endpoint, car);
            tracing::warn!(endpoint, car, error = %err, "request failed");
            err.into_response()
        }
    };
    state
        .metrics()
        .observe(endpoint, response.status().as_u16(), car, start.elapsed());
    response
}
