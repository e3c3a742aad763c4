//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero status.

use thiserror::Error;

use crate::storage::StoreError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Boot and serve failures
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be turned into a store or listener
    #[error("configuration error: {0}")]
    Config(String),

    /// The store failed to open or close
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Binding or serving failed
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "TRACKER_CLI_CONFIG_ERROR",
            CliError::Store(_) => "TRACKER_CLI_STORE_ERROR",
            CliError::Io(_) => "TRACKER_CLI_IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CliError::Config("x".into()).code(), "TRACKER_CLI_CONFIG_ERROR");
        assert_eq!(CliError::from(StoreError::Closed).code(), "TRACKER_CLI_STORE_ERROR");
    }

    #[test]
    fn test_display_includes_cause() {
        let err = CliError::from(StoreError::UnsupportedUrl("redis://x".into()));
        assert!(err.to_string().contains("redis://x"));
    }
}
