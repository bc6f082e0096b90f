use crate::presentation::rest::dto::{ErrorResponse, ReflectionResponse};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Line returned when the reflection endpoint itself breaks
pub const AI_ON_BREAK_LINE: &str = "Oops! AI is on break.";

/// API error type
#[derive(Debug)]
pub struct ApiError {
    pub code: i32,
    pub message: String,
    pub status: StatusCode,
}

impl ApiError {
    pub fn bad_request(code: i32, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError {
            code: -1000,
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid_body(reason: &str) -> Self {
        Self::bad_request(-1100, format!("Illegal request body: {}", reason))
    }

    /// Storage trouble; detail goes to the log, not the client
    pub fn storage_unavailable() -> Self {
        Self::internal("Patch storage is unavailable")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.code, self.message));
        (self.status, body).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API Error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// The reflection task failed above the generator boundary
#[derive(Debug)]
pub struct ReflectionFailure;

impl IntoResponse for ReflectionFailure {
    fn into_response(self) -> Response {
        let body = Json(ReflectionResponse {
            line: AI_ON_BREAK_LINE.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
