use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::repositories::RepositoryError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User not found")]
    UserNotFound,
    #[error("Username already exists")]
    UsernameAlreadyExists,
    #[error("Email already exists")]
    EmailAlreadyExists,
    #[error("Current password is incorrect")]
    CurrentPasswordIncorrect,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Token revoked")]
    TokenRevoked,
    #[error("Missing authorization header")]
    MissingAuthHeader,
    #[error("Invalid authorization header format")]
    InvalidAuthHeaderFormat,
    #[error("Username validation failed: {0}")]
    UsernameValidation(String),
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),
    #[error("Email validation failed: {0}")]
    EmailValidation(String),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Password hashing error: {0}")]
    PasswordHashing(#[from] crate::auth::password::PasswordError),
    #[error("Storage error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for AuthError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::UsernameTaken => AuthError::UsernameAlreadyExists,
            RepositoryError::EmailTaken => AuthError::EmailAlreadyExists,
            RepositoryError::NotFound(_) => AuthError::UserNotFound,
            other => AuthError::Repository(other),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            AuthError::UserNotFound => (StatusCode::NOT_FOUND, "User not found"),
            AuthError::UsernameAlreadyExists => (StatusCode::CONFLICT, "Username already exists"),
            AuthError::EmailAlreadyExists => (StatusCode::CONFLICT, "Email already exists"),
            AuthError::CurrentPasswordIncorrect => (StatusCode::BAD_REQUEST, "Current password is incorrect"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
            AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
            AuthError::TokenRevoked => (StatusCode::UNAUTHORIZED, "Token revoked"),
            AuthError::MissingAuthHeader => (StatusCode::UNAUTHORIZED, "Missing authorization header"),
            AuthError::InvalidAuthHeaderFormat => (StatusCode::UNAUTHORIZED, "Invalid authorization header format"),
            AuthError::UsernameValidation(_) => (StatusCode::BAD_REQUEST, "Username validation failed"),
            AuthError::PasswordValidation(_) => (StatusCode::BAD_REQUEST, "Password validation failed"),
            AuthError::EmailValidation(_) => (StatusCode::BAD_REQUEST, "Email validation failed"),
            AuthError::Jwt(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Token error"),
            AuthError::PasswordHashing(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Password processing error"),
            AuthError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
