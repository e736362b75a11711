//! crates/cms_docs_core/src/versions.rs
//!
//! Discovers the documentation versions present on disk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::DocumentationVersion;

/// Lists version directories under the first candidate root that can be read.
#[derive(Debug, Clone)]
pub struct VersionLocator {
    roots: Vec<PathBuf>,
}

impl VersionLocator {
    /// `roots` is tried in order; the first readable one is used exclusively.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// All versions in ascending numeric order. Never fails: unreadable roots
    /// are skipped as if they did not exist. Numerically equal names (`1`, `1.0`)
    /// are ordered by their text.
    pub fn list_versions(&self) -> Vec<DocumentationVersion> {
        let Some(mut versions) = self.roots.iter().find_map(|root| read_versions(root)) else {
            return Vec::new();
        };
        versions.sort_by(|a, b| {
            a.cmp_numeric(b)
                .then_with(|| a.as_str().cmp(b.as_str()))
        });
        versions
    }

    pub fn latest_version(&self) -> Option<DocumentationVersion> {
        self.list_versions().pop()
    }
}

fn read_versions(root: &Path) -> Option<Vec<DocumentationVersion>> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(root = %root.display(), error = %e, "Skipping documentation root");
            return None;
        }
    };

    let versions = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .map(DocumentationVersion::new)
        .collect();
    Some(versions)
}
