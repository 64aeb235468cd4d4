//! JSON envelopes and the boundary error type.

use std::error::Error;
use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::metrics::Counter;
use crate::repository::RepositoryError;

pub const CAR_CREATED: &str = "car created successfully!";
pub const CAR_UPDATED: &str = "car updated successfully!";

/// Success body: `{message, data}` with empty fields omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> SuccessResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

/// Failure body: `{message, err}` with empty fields omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub err: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Errors surfaced to HTTP clients.
#[derive(Debug)]
pub enum ApiError {
    /// The car id path parameter was empty.
    EmptyId,
    /// The request body could not be read.
    UnreadableBody(String),
    /// The request body was not a car.
    MalformedBody(String),
    /// Lookup of a single car failed.
    Lookup(RepositoryError),
    /// The store holds no cars.
    NoData,
    CreateFailed(RepositoryError),
    UpdateFailed(RepositoryError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::EmptyId => write!(f, "empty id"),
            ApiError::UnreadableBody(msg) => write!(f, "car is invalid: {}", msg),
            ApiError::MalformedBody(msg) => write!(f, "car is invalid: {}", msg),
            ApiError::Lookup(e) => write!(f, "{}", e),
            ApiError::NoData => write!(f, "no data"),
            ApiError::CreateFailed(e) => write!(f, "error creating car: {}", e),
            ApiError::UpdateFailed(e) => write!(f, "error updating car: {}", e),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Lookup(e) | ApiError::CreateFailed(e) | ApiError::UpdateFailed(e) => Some(e),
            _ => None,
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::EmptyId => StatusCode::BAD_REQUEST,
            ApiError::UnreadableBody(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Lookup(_) => StatusCode::NOT_FOUND,
            ApiError::NoData => StatusCode::NOT_FOUND,
            ApiError::CreateFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UpdateFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The failure counter this error increments.
    pub fn counter(&self) -> Counter {
        match self {
            ApiError::EmptyId | ApiError::UnreadableBody(_) => Counter::BadRequest,
            ApiError::MalformedBody(_) => Counter::UnmarshalFail,
            ApiError::Lookup(_) | ApiError::NoData => Counter::NotFound,
            ApiError::CreateFailed(_) => Counter::CreateFail,
            ApiError::UpdateFailed(_) => Counter::UpdateFail,
        }
    }

    fn body(&self) -> ErrorResponse {
        let (message, err) = match self {
            ApiError::EmptyId => (None, Some(self.to_string())),
            ApiError::UnreadableBody(msg) | ApiError::MalformedBody(msg) => {
                (Some("car is invalid".to_string()), Some(msg.clone()))
            }
            ApiError::Lookup(e) => (None, Some(e.to_string())),
            ApiError::NoData => (Some(self.to_string()), None),
            ApiError::CreateFailed(e) => (Some("error creating car".to_string()), Some(e.to_string())),
            ApiError::UpdateFailed(e) => (Some("error updating car".to_string()), Some(e.to_string())),
        };
        ErrorResponse { message, err }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}
