//! services/api/src/web/docs.rs
//!
//! Contains the Axum handlers serving the augmented documentation and the
//! OpenAPI definition of this service's own endpoints.

use crate::error::{ApiError, ErrorDetail, ErrorEnvelope};
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Json, Response},
};
use cms_docs_core::OpenApiDocument;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use utoipa::{OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        versioned_document_handler,
        versioned_full_document_handler,
        latest_document_handler,
        latest_document_alias_handler,
    ),
    components(
        schemas(Health, ErrorEnvelope, ErrorDetail)
    ),
    tags(
        (name = "Documentation", description = "OpenAPI documents for the CMS content API, augmented with the live content types.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Payload Structs
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct Health {
    pub ok: bool,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "The service is up", body = Health)
    )
)]
pub async fn healthz() -> Json<Health> {
    Json(Health { ok: true })
}

/// Serve the augmented documentation for one version.
#[utoipa::path(
    get,
    path = "/documentation/{version}/openapi.json",
    tag = "Documentation",
    params(
        ("version" = String, Path, description = "Documentation version, e.g. 1.0.0")
    ),
    responses(
        (status = 200, description = "The augmented OpenAPI document"),
        (status = 404, description = "No documentation for this version", body = ErrorEnvelope),
        (status = 500, description = "The documentation file could not be read", body = ErrorEnvelope)
    )
)]
pub async fn versioned_document_handler(
    State(state): State<Arc<AppState>>,
    Path(version): Path<String>,
) -> Result<Response, ApiError> {
    let doc = state.docs.document(Some(&version)).await?;
    json_response(&doc)
}

/// Same as `/documentation/{version}/openapi.json`.
#[utoipa::path(
    get,
    path = "/documentation/{version}/full_documentation.json",
    tag = "Documentation",
    params(
        ("version" = String, Path, description = "Documentation version, e.g. 1.0.0")
    ),
    responses(
        (status = 200, description = "The augmented OpenAPI document"),
        (status = 404, description = "No documentation for this version", body = ErrorEnvelope),
        (status = 500, description = "The documentation file could not be read", body = ErrorEnvelope)
    )
)]
pub async fn versioned_full_document_handler(
    state: State<Arc<AppState>>,
    version: Path<String>,
) -> Result<Response, ApiError> {
    versioned_document_handler(state, version).await
}

/// Serve the augmented documentation for the latest version on disk.
#[utoipa::path(
    get,
    path = "/documentation/openapi.json",
    tag = "Documentation",
    responses(
        (status = 200, description = "The augmented OpenAPI document"),
        (status = 404, description = "No documentation version exists", body = ErrorEnvelope),
        (status = 500, description = "The documentation file could not be read", body = ErrorEnvelope)
    )
)]
pub async fn latest_document_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let doc = state.docs.document(None).await?;
    json_response(&doc)
}

/// Same as `/documentation/openapi.json`.
#[utoipa::path(
    get,
    path = "/documentation-json",
    tag = "Documentation",
    responses(
        (status = 200, description = "The augmented OpenAPI document"),
        (status = 404, description = "No documentation version exists", body = ErrorEnvelope),
        (status = 500, description = "The documentation file could not be read", body = ErrorEnvelope)
    )
)]
pub async fn latest_document_alias_handler(
    state: State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    latest_document_handler(state).await
}

fn json_response(doc: &OpenApiDocument) -> Result<Response, ApiError> {
    let body = serde_json::to_string(doc).map_err(|e| ApiError::Internal(e.to_string()))?;
    debug!(bytes = body.len(), "Serving documentation");
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
