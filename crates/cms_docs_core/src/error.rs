//! crates/cms_docs_core/src/error.rs
//!
//! Outcome errors for building a documentation document. Parse failures and
//! registry anomalies are recovered inside the core and have no variant here.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    /// No version resolves, or the resolved version has no backing file.
    #[error("Documentation not found")]
    NotFound,

    /// The file exists but could not be read.
    #[error("Failed to read documentation at {path}: {source}")]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type DocsResult<T> = Result<T, DocsError>;
