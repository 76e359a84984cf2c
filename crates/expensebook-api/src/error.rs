//! Error types for expensebook-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use expensebook_core::CoreError;
use expensebook_store::StoreError;
use thiserror::Error;

/// Errors returned by handlers; rendered as `{"error": "<message>"}`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    Unprocessable { message: String },

    #[error("Internal server error")]
    InternalError,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NotFound { resource, .. } => ApiError::NotFound { resource },
            CoreError::Encoding { .. } => ApiError::Unprocessable {
                message: error.to_string(),
            },
            _ => ApiError::BadRequest {
                message: error.to_string(),
            },
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        log::error!(target: "expensebook::error", "Storage failure: {}", error);
        ApiError::InternalError
    }
}
