//! MyClass Services Layer
//!
//! This crate is the **business service layer**: it hosts the upload publisher
//! workflow, catalog browsing, and account services on top of the storage and
//! db crates. Coordination lives here; the storage and db crates stay thin
//! wrappers over their external services.

pub mod accounts;
pub mod catalog;
pub mod picker;
pub mod publisher;

pub use accounts::AccountService;
pub use catalog::CatalogBrowser;
pub use picker::{FilePicker, PathPicker, PickedFile};
pub use publisher::UploadPublisher;
