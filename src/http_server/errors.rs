//! HTTP error responses
//!
//! Client errors carry their message. Store failures are logged here and
//! answered with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::observability::Event;
use crate::tracker::TrackerError;

/// Generic body for 5xx responses
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<&TrackerError> for ErrorResponse {
    fn from(err: &TrackerError) -> Self {
        let error = if err.is_client_error() {
            err.to_string()
        } else {
            INTERNAL_ERROR_MESSAGE.to_string()
        };
        Self {
            error,
            code: err.status_code(),
        }
    }
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        if let TrackerError::Store(store_error) = &self {
            tracing::error!(
                event = Event::StoreFailure.as_str(),
                code = store_error.code(),
                severity = %store_error.severity(),
                error = %store_error,
                "store call failed"
            );
        }

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
