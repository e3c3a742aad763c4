//! Store backend selection
//!
//! The backend is chosen from a connection string:
//!
//! - `memory://` keeps both collections in process memory
//! - `file:///var/lib/tracker` journals to `<dir>/data/documents.dat`
//! - a bare path is shorthand for `file://<path>`

use std::path::PathBuf;

use super::errors::{StoreError, StoreResult};

const MEMORY_SCHEME: &str = "memory://";
const FILE_SCHEME: &str = "file://";

/// Which backend a [`DocumentStore`](super::DocumentStore) is opened on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StoreConfig {
    #[default]
    InMemory,
    File {
        data_dir: PathBuf,
    },
}

impl StoreConfig {
    /// Parse a connection string into a backend configuration.
    pub fn from_url(url: &str) -> StoreResult<Self> {
        let url = url.trim();

        if url == "memory" || url == MEMORY_SCHEME {
            return Ok(StoreConfig::InMemory);
        }

        let path = match url.strip_prefix(FILE_SCHEME) {
            Some(path) => path,
            None if url.contains("://") => {
                return Err(StoreError::UnsupportedUrl(url.to_string()));
            }
            None => url,
        };

        if path.is_empty() {
            return Err(StoreError::UnsupportedUrl(url.to_string()));
        }

        Ok(StoreConfig::File {
            data_dir: PathBuf::from(path),
        })
    }

    /// Returns whether writes survive a restart
    pub fn is_durable(&self) -> bool {
        matches!(self, StoreConfig::File { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_url() {
        assert_eq!(StoreConfig::from_url("memory://").unwrap(), StoreConfig::InMemory);
        assert_eq!(StoreConfig::from_url(" memory ").unwrap(), StoreConfig::InMemory);
        assert!(!StoreConfig::InMemory.is_durable());
    }

    #[test]
    fn test_file_url() {
        let config = StoreConfig::from_url("file:///var/lib/tracker").unwrap();
        assert_eq!(
            config,
            StoreConfig::File {
                data_dir: PathBuf::from("/var/lib/tracker")
            }
        );
        assert!(config.is_durable());
    }

    #[test]
    fn test_bare_path_is_file_backend() {
        let config = StoreConfig::from_url("./tracker-data").unwrap();
        assert_eq!(
            config,
            StoreConfig::File {
                data_dir: PathBuf::from("./tracker-data")
            }
        );
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        let err = StoreConfig::from_url("mongodb://localhost:27017/tracker").unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedUrl(_)));
    }

    #[test]
    fn test_empty_file_path_rejected() {
        assert!(StoreConfig::from_url("file://").is_err());
        assert!(StoreConfig::from_url("").is_err());
    }
}
