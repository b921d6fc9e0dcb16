use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::repositories::RepositoryError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid request body: {0}")]
    InvalidJson(#[from] JsonRejection),
    #[error("Invalid query parameters: {0}")]
    InvalidQuery(#[from] QueryRejection),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match self {
            ApiError::Auth(err) => return err.into_response(),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::InvalidJson(_) => (StatusCode::BAD_REQUEST, "INVALID_JSON"),
            ApiError::InvalidQuery(_) => (StatusCode::BAD_REQUEST, "INVALID_QUERY"),
            ApiError::Repository(RepositoryError::NotFound(_)) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": error_code,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
