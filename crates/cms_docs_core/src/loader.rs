//! crates/cms_docs_core/src/loader.rs
//!
//! Resolves a documentation version to its `full_documentation.json` file and
//! reads it into an [`OpenApiDocument`].

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::warn;

use crate::document::OpenApiDocument;
use crate::domain::DocumentationVersion;
use crate::error::{DocsError, DocsResult};

/// The file name of a generated documentation snapshot inside a version directory.
pub const DOCUMENT_FILE_NAME: &str = "full_documentation.json";

#[derive(Debug, Clone)]
pub struct DocumentLoader {
    roots: Vec<PathBuf>,
}

impl DocumentLoader {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Returns `<root>/<version>/full_documentation.json` for the first root
    /// where that file exists.
    pub fn resolve(&self, version: &DocumentationVersion) -> Option<PathBuf> {
        if !is_plain_segment(version.as_str()) {
            return None;
        }
        self.roots
            .iter()
            .map(|root| root.join(version.as_str()).join(DOCUMENT_FILE_NAME))
            .find(|candidate| candidate.exists())
    }

    /// Reads and parses the file at `path`.
    ///
    /// Content that is not a JSON object is replaced by an empty document so the
    /// generated parts can still be served. Only the read itself can fail.
    pub fn load(&self, path: &Path) -> DocsResult<OpenApiDocument> {
        let raw = fs::read_to_string(path).map_err(|source| DocsError::ReadFailure {
            path: path.to_path_buf(),
            source,
        })?;

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(OpenApiDocument::from_map(map)),
            Ok(_) => {
                warn!(path = %path.display(), "Documentation file is not a JSON object, using an empty document");
                Ok(OpenApiDocument::default())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse documentation file, using an empty document");
                Ok(OpenApiDocument::default())
            }
        }
    }
}

// A version is a single directory name; anything that could climb out of the
// root never resolves.
fn is_plain_segment(version: &str) -> bool {
    !version.is_empty()
        && version != "."
        && version != ".."
        && !version.contains(['/', '\\'])
}
