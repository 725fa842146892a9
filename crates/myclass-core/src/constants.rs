//! Shared constants.

/// Document-store collection holding published bundles.
pub const UPLOADS_COLLECTION: &str = "uploads";

/// Document-store collection holding user records.
pub const USERS_COLLECTION: &str = "users";

/// Default per-file size ceilings, overridable from the environment.
pub const DEFAULT_MAX_DOCUMENT_SIZE_MB: usize = 50;
pub const DEFAULT_MAX_VIDEO_SIZE_MB: usize = 500;
