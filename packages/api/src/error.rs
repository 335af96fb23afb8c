use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use store::StoreError;
use thiserror::Error;
use tokio::task::JoinError;
use tower_sessions::session;
use tracing::{error, warn};

use crate::auth::PasswordError;

/// Every failure a handler can report. Converted to a JSON error payload in
/// exactly one place, the `IntoResponse` impl below.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A form body that could not be decoded at all.
    #[error("Invalid form: {0}")]
    Form(#[from] FormRejection),

    /// A path id that cannot name any record.
    #[error("Fruit {0} not found")]
    UnknownId(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Session error: {0}")]
    Session(#[from] session::Error),

    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Background task failed: {0}")]
    Task(#[from] JoinError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Form(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownId(_) | AppError::Store(StoreError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            AppError::Store(StoreError::Backend(_))
            | AppError::Session(_)
            | AppError::Render(_)
            | AppError::Password(_)
            | AppError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
