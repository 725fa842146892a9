//! MyClass Storage Library
//!
//! Media-store abstraction and backends. The `MediaStore` trait covers uploading
//! artifact bytes under a caller-chosen public id and fetching them back; the
//! cloud backend talks to the hosted media API over HTTP, the local backend keeps
//! files on disk for development and tests.
//!
//! # Public id format
//!
//! Public ids are derived from the bundle title and artifact kind with whitespace
//! runs normalized to underscores. Derivation is centralized in the `keys` module
//! so every backend and the publisher agree on the format. Ids must not contain
//! `..` or a leading `/`.

pub mod cloud;
pub mod factory;
pub mod keys;
pub mod local;
pub mod progress;
pub mod traits;

// Re-export commonly used types
pub use cloud::CloudMediaStore;
pub use factory::create_media_store;
pub use local::LocalMediaStore;
pub use progress::{NoOpProgress, ProgressObserver, ProgressReport};
pub use traits::{MediaStore, StorageError, StorageResult, UploadReceipt, UploadRequest};
