//! # Error Handling Middleware
//!
//! Maps `EventError` to HTTP status codes and a JSON body of the form
//! `{"error": message, "code": kind}`. Schedule conflicts also carry the
//! blocking event under `conflicting_event`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use eventhall_core::errors::EventError;
use serde_json::json;

/// Client-facing text for dependency failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use eventhall_api::middleware::error_handling::AppError;
/// use eventhall_core::errors::EventError;
///
/// async fn handler(found: bool) -> Result<Json<&'static str>, AppError> {
///     if !found {
///         return Err(AppError(EventError::NotFound("Event not found".to_string())));
///     }
///     Ok(Json("ok"))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub EventError);

pub fn status_for(err: &EventError) -> StatusCode {
    match err {
        EventError::Validation(_) => StatusCode::BAD_REQUEST,
        EventError::NotFound(_) => StatusCode::NOT_FOUND,
        EventError::ScheduleConflict(_) => StatusCode::CONFLICT,
        EventError::Conflict(_) => StatusCode::CONFLICT,
        EventError::InvalidTransition(_) => StatusCode::CONFLICT,
        EventError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        EventError::Dependency(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);

        // Dependency details stay in the log.
        let message = match &self.0 {
            EventError::Dependency(report) => {
                tracing::error!("Request failed: {:?}", report);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        let mut body = json!({
            "error": message,
            "code": self.0.kind(),
        });
        if let EventError::ScheduleConflict(conflict) = &self.0 {
            body["conflicting_event"] = json!(conflict);
        }

        (status, Json(body)).into_response()
    }
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        AppError(err)
    }
}

/// Wraps an eyre report as a dependency failure.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(EventError::Dependency(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(EventError::validation(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(EventError::validation(rejection.body_text()))
    }
}

pub fn map_error(err: EventError) -> Response {
    AppError(err).into_response()
}
