//! services/api/src/adapters/memory.rs
//!
//! An in-memory `ContentTypeRegistry`, for embedding hosts that already hold
//! their content types and for tests.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use cms_docs_core::domain::{ContentTypeDescriptor, ContentTypeMap};
use cms_docs_core::ports::{ContentTypeRegistry, PortError, PortResult};

#[derive(Clone, Debug, Default)]
pub struct StaticContentTypeRegistry {
    content_types: Arc<RwLock<ContentTypeMap>>,
}

impl StaticContentTypeRegistry {
    pub fn new(content_types: ContentTypeMap) -> Self {
        Self {
            content_types: Arc::new(RwLock::new(content_types)),
        }
    }

    /// Registers or replaces a content type. Later requests see the change.
    pub fn register(&self, uid: impl Into<String>, descriptor: ContentTypeDescriptor) -> PortResult<()> {
        let mut content_types = self
            .content_types
            .write()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        content_types.insert(uid.into(), descriptor);
        Ok(())
    }
}

#[async_trait]
impl ContentTypeRegistry for StaticContentTypeRegistry {
    async fn content_types(&self) -> PortResult<ContentTypeMap> {
        let content_types = self
            .content_types
            .read()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(content_types.clone())
    }
}
