//! MyClass Core Library
//!
//! This crate provides the domain models, error types, configuration, and validation
//! shared across all MyClass components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, DocStoreBackend, MediaBackend};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    ArtifactKind, BundleRecord, Category, NewBundle, NewUser, PublishedBundle, SelectedFile,
    UploadedReference, UserProfile, UserRecord,
};
