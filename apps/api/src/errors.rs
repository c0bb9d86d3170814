use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The variants are coarse categories an operator can act on: a missing tool
/// or template fragment means the deployment is broken, a compilation failure
/// means the input produced invalid markup, and packaging/I/O failures point
/// at resource pressure on the host.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("'{0}' not found in PATH")]
    ToolNotFound(String),

    #[error("Template fragment missing: {0}")]
    TemplateMissing(String),

    #[error("LaTeX compilation failed: {0}")]
    Compilation(String),

    #[error("Failed to package documents: {0}")]
    Packaging(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wraps an `io::Error` with the operation that produced it.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Io {
            context: context.into(),
            source,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ToolNotFound(tool) => {
                tracing::error!("Required tool missing: {tool}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TOOL_NOT_FOUND",
                    format!(
                        "'{tool}' not found in PATH; install TeX Live and ensure {tool} is available"
                    ),
                )
            }
            AppError::TemplateMissing(name) => {
                tracing::error!("Template fragment missing: {name}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TEMPLATE_MISSING",
                    format!("Template fragment missing: {name}"),
                )
            }
            AppError::Compilation(output) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "COMPILATION_FAILED",
                format!("LaTeX compilation failed: {output}"),
            ),
            AppError::Packaging(msg) => {
                tracing::error!("Packaging error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PACKAGING_FAILED",
                    msg.clone(),
                )
            }
            AppError::Io { context, source } => {
                tracing::error!("I/O error: {context}: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR", context.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
