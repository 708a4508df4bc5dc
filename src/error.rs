use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;

use crate::validation::FieldErrors;

/// Message shown to the visitor when a signup could not be stored.
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to save your information. Please try again.";

/// Message shown when the signup list could not be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load signups. Please try again.";

/// Message returned for store failures at the HTTP boundary.
pub const STORE_UNAVAILABLE_MESSAGE: &str = "The waitlist store could not complete the request. Please try again.";

/// Message shown when the admin email does not match.
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied. Only authorized admin can view signups.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed for: {}", .0.field_names().join(", "))]
    Validation(FieldErrors),

    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("Signup could not be stored: {0}")]
    SubmitFailed(#[source] sqlx::Error),

    #[error("Signups could not be loaded: {0}")]
    LoadFailed(#[source] sqlx::Error),

    #[error("Invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("{}", ACCESS_DENIED_MESSAGE)]
    AuthorizationDenied,

    #[error("Submission already in progress")]
    SubmitInProgress,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Re-tag a store failure raised while saving a signup.
    pub fn on_submit(self) -> Self {
        match self {
            AppError::Persistence(err) => AppError::SubmitFailed(err),
            other => other,
        }
    }

    /// Re-tag a store failure raised while loading the signup list.
    pub fn on_load(self) -> Self {
        match self {
            AppError::Persistence(err) => AppError::LoadFailed(err),
            other => other,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Internal(format!("Migration failed: {}", err))
    }
}

// Axum IntoResponse implementation for HTTP errors
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            AppError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::json!({
                    "error": "Validation failed",
                    "fields": fields,
                }),
            ),
            // Store failures are logged by the repository.
            AppError::Persistence(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": STORE_UNAVAILABLE_MESSAGE }),
            ),
            AppError::SubmitFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": SUBMIT_FAILED_MESSAGE }),
            ),
            AppError::LoadFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": LOAD_FAILED_MESSAGE }),
            ),
            AppError::InvalidBody { status, message } => {
                (status, serde_json::json!({ "error": message }))
            }
            AppError::AuthorizationDenied => (
                StatusCode::FORBIDDEN,
                serde_json::json!({ "error": ACCESS_DENIED_MESSAGE }),
            ),
            AppError::SubmitInProgress => (
                StatusCode::CONFLICT,
                serde_json::json!({ "error": "Submission already in progress" }),
            ),
            AppError::Config(msg) | AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": msg }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
