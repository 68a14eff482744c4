//! Error type for the fallible surfaces (config, API, insight provider)
//!
//! The classifier and the expression processor are total and never return it.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MindwatchError>;

#[derive(Debug, Error)]
pub enum MindwatchError {
    /// Invalid or unparsable configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request data failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Concurrent session cap reached
    #[error("Session limit reached ({0} active)")]
    SessionLimit(usize),

    /// The external insight provider failed
    #[error("Insight provider error: {0}")]
    Insight(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl MindwatchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MindwatchError::Validation(_) => StatusCode::BAD_REQUEST,
            MindwatchError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            MindwatchError::SessionLimit(_) => StatusCode::SERVICE_UNAVAILABLE,
            MindwatchError::Insight(_) => StatusCode::BAD_GATEWAY,
            MindwatchError::Config(_) | MindwatchError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Unreadable or mistyped request bodies are validation failures
impl From<JsonRejection> for MindwatchError {
    fn from(rejection: JsonRejection) -> Self {
        MindwatchError::Validation(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for MindwatchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
