use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::{LlmError, Provider};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Provider failure, surfaced with the provider tag, e.g. `Claude API Error: ...`.
    #[error("{tag}: {source}")]
    Optimization {
        tag: &'static str,
        #[source]
        source: LlmError,
    },

    #[error("Render failed: {0}")]
    Render(String),
}

impl AppError {
    pub fn optimization(provider: Provider, source: LlmError) -> Self {
        AppError::Optimization {
            tag: provider.error_tag(),
            source,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Optimization { .. } => {
                tracing::error!("Optimization failed: {self}");
                (
                    StatusCode::BAD_GATEWAY,
                    "OPTIMIZATION_FAILED",
                    self.to_string(),
                )
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_FAILED",
                    format!("PDF generation failed: {msg}"),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
