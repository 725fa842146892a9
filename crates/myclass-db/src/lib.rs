//! MyClass DB Library
//!
//! Document-store abstraction and repositories. The external store is
//! schema-less: documents are JSON values grouped into named collections, and
//! one insert is one atomic append. Repositories give the rest of the
//! application domain-typed access to the bundle catalog and the user
//! directory.

pub mod catalog;
pub mod factory;
pub mod memory;
pub mod rest;
pub mod traits;
pub mod users;

// Re-export commonly used types
pub use catalog::CatalogRepository;
pub use factory::create_document_store;
pub use memory::MemoryDocumentStore;
pub use rest::RestDocumentStore;
pub use traits::{DbError, DbResult, DocumentStore, StoredDocument};
pub use users::UserRepository;
