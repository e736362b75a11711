//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;

use cms_docs_core::ports::ContentTypeRegistry;
use cms_docs_core::DocumentationService;

use crate::adapters::FsContentTypeRegistry;
use crate::config::Config;

/// The shared application state, created once at startup and passed to all handlers.
///
/// It holds no documents: each request rebuilds its document from disk and the
/// live registry.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub docs: DocumentationService,
}

impl AppState {
    pub fn new(config: Arc<Config>, registry: Arc<dyn ContentTypeRegistry>) -> Self {
        let docs = DocumentationService::new(config.documentation_roots.clone(), registry);
        Self { config, docs }
    }

    /// State backed by the CMS's on-disk content-type schemas.
    pub fn from_config(config: Arc<Config>) -> Self {
        let registry = Arc::new(FsContentTypeRegistry::new(config.content_types_dir.clone()));
        Self::new(config, registry)
    }
}
