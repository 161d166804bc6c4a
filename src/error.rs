//! Error types for the OCR server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::engine::EngineError;
use crate::gate::GateError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Request-level error taxonomy: client input errors map to 4xx, engine
/// and internal failures to 5xx.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("missing multipart part: {0}")]
    MissingPart(&'static str),

    #[error("lang part is present but empty")]
    EmptyLanguage,

    #[error("unknown language: {0:?}")]
    UnknownLanguage(String),

    #[error("invalid multipart body: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("failed to stage upload: {0}")]
    Staging(#[from] std::io::Error),

    #[error("recognition failed: {0}")]
    Engine(#[from] EngineError),

    #[error("admission gate failure: {0}")]
    Gate(#[from] GateError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingPart(_) | AppError::EmptyLanguage | AppError::UnknownLanguage(_) => {
                StatusCode::BAD_REQUEST
            }
            // Propagates the extractor's own status, e.g. 413 for an
            // oversized body
            AppError::Multipart(e) => e.status(),
            AppError::Staging(_) | AppError::Gate(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Engine(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::MissingPart(_) => "missing_part",
            AppError::EmptyLanguage => "empty_language",
            AppError::UnknownLanguage(_) => "unknown_language",
            AppError::Multipart(_) => "invalid_multipart",
            AppError::Staging(_) => "staging_failed",
            AppError::Engine(_) => "engine_failed",
            AppError::Gate(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.kind(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_4xx() {
        assert_eq!(
            AppError::MissingPart("file").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::EmptyLanguage.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::UnknownLanguage("xx".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn engine_failures_are_5xx() {
        let err = AppError::Engine(EngineError::InvalidOutput(
            serde_json::from_str::<serde_json::Value>("not json").unwrap_err(),
        ));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }
}
