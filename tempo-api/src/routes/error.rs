use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use crate::domain::ActivityError;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ActivityError> for ApiError {
    fn from(err: ActivityError) -> Self {
        match err {
            ActivityError::InvalidDateFormat(_)
            | ActivityError::InvalidTimezone(_)
            | ActivityError::InvalidRange
            | ActivityError::InvalidInstant(_)
            | ActivityError::AlreadyDoing
            | ActivityError::ClockOutNotAfterClockIn
            | ActivityError::InvalidRecurrence(_) => Self::bad_request(err.to_string()),
            ActivityError::ActivityNotFound(_) => Self::not_found("Activity not found"),
            ActivityError::TaskNotFound(_) => Self::not_found("Task not found"),
            ActivityError::StoreUnavailable(ref message) => {
                tracing::error!("Activity store error: {}", message);
                Self::internal("activity store unavailable")
            }
            ActivityError::MalformedCandidate { .. } => {
                tracing::error!("{}", err);
                Self::internal(err.to_string())
            }
        }
    }
}
