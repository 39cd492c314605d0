use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::error;

use crate::errors::Error;

const INTERNAL_MESSAGE: &str = "Internal Server Error";
const DUPLICATE_USERNAME_MESSAGE: &str =
    "Username already exists. Please choose a different username.";

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    UnprocessableEntity(String),
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        ApiError::NotFound(msg.into())
    }

    /// Generic 500; details stay in the logs.
    pub fn internal() -> Self {
        ApiError::Internal(INTERNAL_MESSAGE.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let (error_kind, message) = match self {
            ApiError::BadRequest(msg) => ("bad_request", msg),
            ApiError::NotFound(msg) => ("not_found", msg),
            ApiError::UnprocessableEntity(msg) => ("unprocessable_entity", msg),
            ApiError::Internal(msg) => ("internal_error", msg),
        };

        (status, Json(ErrorBody { error: error_kind, message })).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation { message, .. } => ApiError::BadRequest(message),
            Error::DuplicateUsername { .. } => {
                ApiError::BadRequest(DUPLICATE_USERNAME_MESSAGE.to_string())
            }
            Error::NotFound { resource_type, .. } => {
                ApiError::NotFound(format!("{} not found", resource_type))
            }
            other => {
                error!(error = %other, backend = other.is_backend_error(), "Request failed");
                ApiError::internal()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::UnprocessableEntity(rejection.body_text())
    }
}
