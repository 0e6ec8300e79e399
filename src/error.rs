//! Error types for the student portal

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use crate::auth::models::Role;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No authentication credential provided")]
    MissingCredential,

    #[error("Invalid authentication credential")]
    InvalidCredential,

    #[error("Role mismatch: requires '{required}' role")]
    RoleMismatch { required: Role },

    #[error("{0}")]
    LoginRejected(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("User '{0}' already exists")]
    UserAlreadyExists(String),

    #[error("Invalid marks submission: {0}")]
    InvalidMarks(String),

    #[error("{0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file not found. Run 'studentportal init' first.")]
    ConfigNotFound,

    #[error("Token error: {0}")]
    Token(String),

    #[error("Password hash error: {0}")]
    Password(#[from] bcrypt::BcryptError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

/// Wire mapping for protected endpoints: `{ success: false, error: <kind>,
/// message }` with 401 for a missing or invalid credential and 403 for a
/// wrong role.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            Error::MissingCredential | Error::InvalidCredential => (
                StatusCode::UNAUTHORIZED,
                json!("unauthorized"),
                "Please login to continue".to_string(),
            ),
            Error::RoleMismatch { .. } => (
                StatusCode::FORBIDDEN,
                json!("forbidden"),
                "You do not have permission to access this resource".to_string(),
            ),
            err @ Error::LoginRejected(_) => (StatusCode::UNAUTHORIZED, json!(true), err.to_string()),
            err @ Error::InvalidMarks(_) => (StatusCode::BAD_REQUEST, json!(true), err.to_string()),
            err @ Error::UserNotFound(_) => (StatusCode::NOT_FOUND, json!(true), err.to_string()),
            err @ Error::UserAlreadyExists(_) => (StatusCode::CONFLICT, json!(true), err.to_string()),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!(true),
                other.to_string(),
            ),
        };

        (
            status,
            Json(json!({
                "success": false,
                "error": kind,
                "message": message,
            })),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
