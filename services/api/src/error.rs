//! services/api/src/error.rs
//!
//! Defines the primary error type for the documentation service and the
//! structured JSON body errors are rendered as.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cms_docs_core::DocsError;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::error;
use utoipa::ToSchema;

use crate::config::ConfigError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The documentation for a request could not be produced.
    #[error("Documentation error: {0}")]
    Docs(#[from] DocsError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

//=========================================================================================
// HTTP Error Body
//=========================================================================================

/// `{data: null, error: {...}}`, the envelope the CMS uses for every error.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub data: Option<Value>,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    pub status: u16,
    pub name: String,
    pub message: String,
    #[schema(value_type = Object)]
    pub details: Map<String, Value>,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, name: &str, message: &str) -> Self {
        Self {
            data: None,
            error: ErrorDetail {
                status: status.as_u16(),
                name: name.to_string(),
                message: message.to_string(),
                details: Map::new(),
            },
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "NotFoundError", "Documentation not found")
    }

    pub fn server_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "ServerError",
            "Failed to read documentation",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Docs(DocsError::NotFound) => {
                (StatusCode::NOT_FOUND, Json(ErrorEnvelope::not_found())).into_response()
            }
            other => {
                error!("Failed to serve documentation: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorEnvelope::server_error()),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn not_found_body_is_exact() {
        assert_eq!(
            serde_json::to_value(ErrorEnvelope::not_found()).unwrap(),
            json!({
                "data": null,
                "error": {
                    "status": 404,
                    "name": "NotFoundError",
                    "message": "Documentation not found",
                    "details": {}
                }
            })
        );
    }

    #[test]
    fn server_error_body_is_exact() {
        assert_eq!(
            serde_json::to_value(ErrorEnvelope::server_error()).unwrap(),
            json!({
                "data": null,
                "error": {
                    "status": 500,
                    "name": "ServerError",
                    "message": "Failed to read documentation",
                    "details": {}
                }
            })
        );
    }

    #[test]
    fn docs_errors_map_to_status() {
        let not_found = ApiError::from(DocsError::NotFound).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let read = ApiError::from(DocsError::ReadFailure {
            path: "/srv/docs/1.0.0/full_documentation.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        })
        .into_response();
        assert_eq!(read.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
