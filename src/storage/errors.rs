//! Store error types
//!
//! Error codes:
//! - TRACKER_STORAGE_IO_ERROR (ERROR severity)
//! - TRACKER_DATA_CORRUPTION (FATAL severity)
//! - TRACKER_VALIDATION_FAILED (ERROR severity)
//! - TRACKER_STORE_CLOSED (ERROR severity)
//! - TRACKER_STORE_UNAVAILABLE (ERROR severity)
//! - TRACKER_UNSUPPORTED_URL (FATAL severity, startup only)

use std::fmt;
use std::io;

use thiserror::Error;

/// Severity levels for store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, server continues
    Error,
    /// The store cannot be used any further
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Failures raised by the record store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Disk I/O failure while reading or appending records
    #[error("storage I/O failed: {message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    /// A record on disk failed its checksum or framing checks
    #[error("data corruption at byte offset {offset}: {reason}")]
    Corruption { offset: u64, reason: String },

    /// A document was rejected before it reached the collection
    #[error("validation failed: {0}")]
    Validation(String),

    /// The store handle has been closed
    #[error("store is closed")]
    Closed,

    /// A collection lock was poisoned by a panicking writer
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The connection string names a backend this build does not know
    #[error("unsupported connection string: {0}")]
    UnsupportedUrl(String),
}

impl StoreError {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a corruption error pinned to a byte offset
    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        StoreError::Corruption {
            offset,
            reason: reason.into(),
        }
    }

    /// Create a validation error for a missing required field
    pub fn required(collection: &str, field: &str) -> Self {
        StoreError::Validation(format!("{collection}: `{field}` is required"))
    }

    /// Returns the error code
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "TRACKER_STORAGE_IO_ERROR",
            StoreError::Corruption { .. } => "TRACKER_DATA_CORRUPTION",
            StoreError::Validation(_) => "TRACKER_VALIDATION_FAILED",
            StoreError::Closed => "TRACKER_STORE_CLOSED",
            StoreError::Unavailable(_) => "TRACKER_STORE_UNAVAILABLE",
            StoreError::UnsupportedUrl(_) => "TRACKER_UNSUPPORTED_URL",
        }
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        match self {
            StoreError::Corruption { .. } | StoreError::UnsupportedUrl(_) => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// Returns whether the store must not be used after this error
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
