pub mod docs;
pub mod state;

use std::sync::Arc;

use axum::{http::HeaderValue, http::Method, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ConfigError;
use crate::error::ApiError;
use docs::{
    healthz, latest_document_alias_handler, latest_document_handler,
    versioned_document_handler, versioned_full_document_handler, ApiDoc,
};
use state::AppState;

/// Builds the complete application router.
///
/// The documentation routes are public; they are only registered when the
/// documentation plugin is enabled.
pub fn build_router(state: Arc<AppState>) -> Result<Router, ApiError> {
    let mut api_router = Router::new().route("/healthz", get(healthz));

    if state.config.documentation_enabled {
        api_router = api_router
            .route("/documentation/openapi.json", get(latest_document_handler))
            .route("/documentation-json", get(latest_document_alias_handler))
            .route(
                "/documentation/{version}/openapi.json",
                get(versioned_document_handler),
            )
            .route(
                "/documentation/{version}/full_documentation.json",
                get(versioned_full_document_handler),
            );
    } else {
        info!("Documentation plugin disabled, documentation routes not registered");
    }

    let cors = match state.config.cors_origin.as_deref() {
        Some(origin) => {
            let origin = origin.parse::<HeaderValue>().map_err(|e| {
                ConfigError::InvalidValue("CORS_ORIGIN".to_string(), e.to_string())
            })?;
            Some(
                CorsLayer::new()
                    .allow_origin(origin)
                    .allow_methods([Method::GET, Method::OPTIONS]),
            )
        }
        None => None,
    };

    let mut app = Router::new()
        .merge(api_router.with_state(state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());
    if let Some(cors) = cors {
        app = app.layer(cors);
    }
    Ok(app)
}
