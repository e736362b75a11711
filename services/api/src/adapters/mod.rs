pub mod fs_registry;
pub mod memory;

pub use fs_registry::FsContentTypeRegistry;
pub use memory::StaticContentTypeRegistry;
