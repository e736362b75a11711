//! services/api/src/lib.rs
//!
//! The documentation service: configuration, registry adapters and the HTTP
//! surface around `cms_docs_core`.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
