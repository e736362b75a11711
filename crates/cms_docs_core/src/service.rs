//! crates/cms_docs_core/src/service.rs
//!
//! Builds the augmented documentation for one request: locate the version,
//! load the static file, normalize it, then merge in what the live content-type
//! registry describes. Nothing is cached; every call starts from the file.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::document::OpenApiDocument;
use crate::domain::{ContentTypeMap, DocumentationVersion};
use crate::error::{DocsError, DocsResult};
use crate::loader::DocumentLoader;
use crate::ports::ContentTypeRegistry;
use crate::synthesize::SchemaSynthesizer;
use crate::versions::VersionLocator;

#[derive(Clone)]
pub struct DocumentationService {
    locator: VersionLocator,
    loader: DocumentLoader,
    synthesizer: SchemaSynthesizer,
    registry: Arc<dyn ContentTypeRegistry>,
}

impl DocumentationService {
    /// `roots` are the candidate documentation roots, highest priority first.
    pub fn new(roots: Vec<PathBuf>, registry: Arc<dyn ContentTypeRegistry>) -> Self {
        Self {
            locator: VersionLocator::new(roots.clone()),
            loader: DocumentLoader::new(roots),
            synthesizer: SchemaSynthesizer::default(),
            registry,
        }
    }

    pub fn versions(&self) -> Vec<DocumentationVersion> {
        self.locator.list_versions()
    }

    /// Builds the document for `version`, or for the latest version on disk
    /// when `None`.
    pub async fn document(&self, version: Option<&str>) -> DocsResult<OpenApiDocument> {
        let version = match version {
            Some(v) => DocumentationVersion::new(v),
            None => self.locator.latest_version().ok_or(DocsError::NotFound)?,
        };
        let path = self.loader.resolve(&version).ok_or(DocsError::NotFound)?;
        debug!(%version, path = %path.display(), "Loading documentation");

        let mut doc = self.loader.load(&path)?;
        doc.normalize();

        let content_types = self.content_types().await;
        self.synthesizer.synthesize(&mut doc, &content_types);
        Ok(doc)
    }

    // A failing registry only costs the generated parts; the static document is
    // still served.
    async fn content_types(&self) -> ContentTypeMap {
        match self.registry.content_types().await {
            Ok(content_types) => content_types,
            Err(e) => {
                warn!(error = %e, "Content-type registry unavailable, serving static documentation only");
                ContentTypeMap::new()
            }
        }
    }
}
