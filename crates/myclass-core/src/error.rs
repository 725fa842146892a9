//! Error types module
//!
//! This module provides the core error types used throughout the MyClass application.
//! All errors are unified under the `AppError` enum; every failure is surfaced to the
//! caller as a single user-visible notification, so each variant self-describes how
//! it should be presented and logged.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like unreadable selections
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error presentation.
///
/// Nothing is retried automatically anywhere in the workflow; `is_recoverable`
/// means "the user can correct something and try again", not "retry transparently".
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "UPLOAD_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether the user can recover by correcting input or reselecting
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("File access error: {0}")]
    FileAccess(String),

    #[error("Upload failed: {message}")]
    Upload {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Persist failed: {message}")]
    Persist {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// Upload failure wrapping the underlying transport or server error.
    pub fn upload(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        AppError::Upload {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Persistence failure wrapping the underlying document-store error.
    pub fn persist(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        AppError::Persist {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Get the error type name for detailed error reporting
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::FileAccess(_) => "FileAccess",
            AppError::Upload { .. } => "Upload",
            AppError::Persist { .. } => "Persist",
            AppError::NotFound(_) => "NotFound",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Config(_) => "Config",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including the source chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::FileAccess(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("{}", err))
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action,
/// sensitive, log_level). client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (&'static str, bool, Option<&'static str>, bool, LogLevel) {
    match err {
        AppError::Validation(_) => (
            "VALIDATION_ERROR",
            true,
            Some("Correct the highlighted input and publish again"),
            false,
            LogLevel::Debug,
        ),
        AppError::FileAccess(_) => (
            "FILE_ACCESS_ERROR",
            true,
            Some("Reselect the file and try again"),
            false,
            LogLevel::Warn,
        ),
        AppError::Upload { .. } => (
            "UPLOAD_ERROR",
            false,
            Some("Check the connection and publish again"),
            true,
            LogLevel::Error,
        ),
        AppError::Persist { .. } => (
            "PERSIST_ERROR",
            false,
            Some("Publish again; previously uploaded files are kept remotely"),
            true,
            LogLevel::Error,
        ),
        AppError::NotFound(_) => (
            "NOT_FOUND",
            false,
            Some("Verify the identifier exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::Unauthorized(_) => (
            "UNAUTHORIZED",
            true,
            Some("Check the email and password"),
            false,
            LogLevel::Debug,
        ),
        AppError::Config(_) => (
            "CONFIG_ERROR",
            false,
            Some("Fix the environment configuration"),
            true,
            LogLevel::Error,
        ),
        AppError::Internal(_) => ("INTERNAL_ERROR", false, None, true, LogLevel::Error),
        AppError::InternalWithSource { .. } => {
            ("INTERNAL_ERROR", false, None, true, LogLevel::Error)
        }
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).2
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).4
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(ref msg) => msg.clone(),
            AppError::FileAccess(ref msg) => msg.clone(),
            AppError::Upload { ref message, .. } => message.clone(),
            AppError::Persist { .. } => "Failed to save the upload record".to_string(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::Unauthorized(ref msg) => msg.clone(),
            AppError::Config(_) => "Service is misconfigured".to_string(),
            AppError::Internal(_) => "Internal error".to_string(),
            AppError::InternalWithSource { .. } => "Internal error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_validation() {
        let err = AppError::Validation("missing title".to_string());
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "missing title");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_upload() {
        let err = AppError::upload(
            "media store rejected the transfer",
            anyhow::anyhow!("status 500"),
        );
        assert_eq!(err.error_code(), "UPLOAD_ERROR");
        assert!(!err.is_recoverable());
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
        assert_eq!(err.client_message(), "media store rejected the transfer");
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let err = AppError::persist("insert failed", anyhow::anyhow!("connection reset"));
        let details = err.detailed_message();
        assert!(details.contains("insert failed"));
        assert!(details.contains("Caused by: connection reset"));
    }

    #[test]
    fn test_io_error_maps_to_file_access() {
        let err = AppError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.error_type(), "FileAccess");
        assert!(err.is_recoverable());
    }
}
