//! Upload publisher workflow.

mod service;

pub use service::UploadPublisher;
