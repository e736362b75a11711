pub mod document;
pub mod domain;
pub mod error;
pub mod loader;
pub mod ports;
pub mod service;
pub mod synthesize;
pub mod versions;

pub use document::OpenApiDocument;
pub use domain::{
    AttributeDefinition, AttributeType, ContentTypeDescriptor, ContentTypeInfo, ContentTypeMap,
    DocumentationVersion,
};
pub use error::{DocsError, DocsResult};
pub use loader::{DocumentLoader, DOCUMENT_FILE_NAME};
pub use ports::{ContentTypeRegistry, PortError, PortResult};
pub use service::DocumentationService;
pub use synthesize::{SchemaCollision, SchemaSynthesizer, SynthesisReport, APPLICATION_NAMESPACE};
pub use versions::VersionLocator;
