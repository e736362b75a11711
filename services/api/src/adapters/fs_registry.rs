//! services/api/src/adapters/fs_registry.rs
//!
//! This module contains the filesystem registry adapter, the concrete
//! implementation of the `ContentTypeRegistry` port that reads the CMS's own
//! content-type definitions:
//!
//! ```text
//! <content_types_dir>/<api>/content-types/<model>/schema.json  ->  api::<api>.<model>
//! ```
//!
//! The tree is scanned again on every call so newly added or edited content
//! types show up without a restart.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cms_docs_core::domain::{ContentTypeDescriptor, ContentTypeMap};
use cms_docs_core::ports::{ContentTypeRegistry, PortError, PortResult};
use tracing::{debug, warn};

const SCHEMA_FILE_NAME: &str = "schema.json";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A registry adapter that implements the `ContentTypeRegistry` port from schema files.
#[derive(Clone, Debug)]
pub struct FsContentTypeRegistry {
    root: PathBuf,
}

impl FsContentTypeRegistry {
    /// Creates a new `FsContentTypeRegistry` over `<app>/src/api`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walks the tree synchronously. A missing root is an empty registry; a
    /// schema file that cannot be read or parsed is skipped.
    pub fn scan(&self) -> ContentTypeMap {
        let mut content_types = ContentTypeMap::new();
        for (api, api_dir) in subdirectories(&self.root) {
            for (model, model_dir) in subdirectories(&api_dir.join("content-types")) {
                let schema_path = model_dir.join(SCHEMA_FILE_NAME);
                if !schema_path.is_file() {
                    continue;
                }
                match read_schema(&schema_path) {
                    Ok(descriptor) => {
                        content_types.insert(format!("api::{api}.{model}"), descriptor);
                    }
                    Err(e) => {
                        warn!(path = %schema_path.display(), error = %e, "Skipping unreadable content-type schema");
                    }
                }
            }
        }
        debug!(root = %self.root.display(), count = content_types.len(), "Scanned content types");
        content_types
    }
}

fn subdirectories(dir: &Path) -> Vec<(String, PathBuf)> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut dirs: Vec<(String, PathBuf)> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            Some((name, entry.path()))
        })
        .collect();
    dirs.sort();
    dirs
}

fn read_schema(path: &Path) -> PortResult<ContentTypeDescriptor> {
    let raw = fs::read_to_string(path).map_err(|e| PortError::Unexpected(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| PortError::Unexpected(e.to_string()))
}

//=========================================================================================
// `ContentTypeRegistry` Trait Implementation
//=========================================================================================

#[async_trait]
impl ContentTypeRegistry for FsContentTypeRegistry {
    async fn content_types(&self) -> PortResult<ContentTypeMap> {
        let registry = self.clone();
        tokio::task::spawn_blocking(move || registry.scan())
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}
