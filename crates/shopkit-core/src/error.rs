//! Error types module
//!
//! The unified `AppError` enum covers every failure the upload pipeline and the
//! product endpoints can report. Each variant carries its own HTTP presentation
//! through the `ErrorMetadata` trait, so the HTTP layer never invents status
//! codes or client messages on its own.
//!
//! The `From<sqlx::Error>` conversion is gated behind the `sqlx` feature.

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for operator-actionable conditions
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error type name (used in logs)
    fn error_type(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The multipart request carried no usable file part.
    #[error("no file uploaded")]
    MissingFile,

    /// Required fields missing or unparsable. Rejected before any I/O.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The destination bucket does not exist. The message names the bucket and
    /// tells the operator to create it; the provider diagnostic is logged, not
    /// sent to the client.
    #[error("bucket not configured: {0}")]
    BucketNotConfigured(String),

    /// Object-store write failed for any reason other than a missing bucket.
    #[error("storage write failed: {0}")]
    StorageWrite(String),

    /// Record-store insert/update failed. Always terminal.
    #[error("record write failed: {0}")]
    RecordWrite(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Catch-all converted at the handler boundary; never propagates as a fault.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::RowNotFound => AppError::NotFound("record not found".to_string()),
            other => AppError::RecordWrite(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Unexpected(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON parsing error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Validation(format!("UUID parsing error: {}", err))
    }
}

/// Static metadata per variant: (http_status, error_type, log_level).
/// `client_message` stays per-variant for dynamic content.
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::MissingFile => (400, "MissingFile", LogLevel::Debug),
        AppError::Validation(_) => (400, "ValidationFailed", LogLevel::Debug),
        AppError::BucketNotConfigured(_) => (500, "BucketNotConfigured", LogLevel::Warn),
        AppError::StorageWrite(_) => (500, "StorageWriteFailed", LogLevel::Error),
        AppError::RecordWrite(_) => (500, "RecordWriteFailed", LogLevel::Error),
        AppError::NotFound(_) => (404, "NotFound", LogLevel::Debug),
        AppError::Unexpected(_) => (500, "Unexpected", LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_type(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MissingFile => "No file uploaded".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::BucketNotConfigured(msg) => msg.clone(),
            AppError::StorageWrite(msg) => format!("Upload failed: {}", msg),
            AppError::RecordWrite(msg) => format!("Failed to create product: {}", msg),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Unexpected(msg) => format!("An unexpected error occurred: {}", msg),
        }
    }
}
