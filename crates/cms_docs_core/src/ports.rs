//! crates/cms_docs_core/src/ports.rs
//!
//! Defines the service contracts (traits) the core depends on.
//! The content-type registry lives in the host CMS; the core only reads it
//! through this boundary, so it can be backed by the filesystem, a live CMS,
//! or a fixed map in tests.

use async_trait::async_trait;

use crate::domain::ContentTypeMap;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait ContentTypeRegistry: Send + Sync {
    /// Returns every registered content type keyed by identifier,
    /// including plugin-owned and internal ones.
    async fn content_types(&self) -> PortResult<ContentTypeMap>;
}
