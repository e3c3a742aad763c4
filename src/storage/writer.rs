//! Journal writer with fsync enforcement
//!
//! The journal is append-only. A write is not acknowledged until the record
//! has been fsynced. Bytes past the last acknowledged record are cut off
//! before the next append, so a failed write never strands later records
//! behind a partial one.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::record::DocumentRecord;

/// File name of the journal inside `<data_dir>/data`
pub const JOURNAL_FILE: &str = "documents.dat";

/// Resolves the journal path for a data directory.
pub fn journal_path(data_dir: &Path) -> PathBuf {
    data_dir.join("data").join(JOURNAL_FILE)
}

/// Append-only writer over `<data_dir>/data/documents.dat`.
pub struct StorageWriter {
    storage_path: PathBuf,
    file: File,
    /// End of the last fsynced record
    current_offset: u64,
    /// Set when a partial write could not be cut off
    poisoned: bool,
}

impl StorageWriter {
    /// Opens or creates the journal, creating parent directories if needed.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let storage_path = journal_path(data_dir);

        if let Some(parent) = storage_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::io(
                    format!("Failed to create data directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&storage_path)
            .map_err(|e| {
                StoreError::io(
                    format!("Failed to open storage file: {}", storage_path.display()),
                    e,
                )
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StoreError::io("Failed to read file metadata", e))?
            .len();

        Ok(Self {
            storage_path,
            file,
            current_offset,
            poisoned: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// True once the journal holds bytes that could not be removed.
    /// A poisoned writer refuses every further append.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Appends a record and fsyncs. Returns the byte offset of the record.
    ///
    /// On failure the journal is cut back to the previous record boundary.
    pub fn append(&mut self, record: &DocumentRecord) -> StoreResult<u64> {
        if self.poisoned {
            return Err(StoreError::Unavailable(format!(
                "journal {} has an unremovable partial record",
                self.storage_path.display()
            )));
        }

        self.discard_tail()?;

        let serialized = record.serialize();
        let offset = self.current_offset;

        let written = self
            .file
            .write_all(&serialized)
            .map_err(|e| {
                StoreError::io(
                    format!(
                        "Failed to write record {}:{}",
                        record.collection, record.document_id
                    ),
                    e,
                )
            })
            .and_then(|()| {
                self.file.sync_all().map_err(|e| {
                    StoreError::io(
                        format!(
                            "fsync failed after writing record {}:{}",
                            record.collection, record.document_id
                        ),
                        e,
                    )
                })
            });

        if let Err(e) = written {
            self.truncate_to_offset();
            return Err(e);
        }

        self.current_offset += serialized.len() as u64;

        Ok(offset)
    }

    /// Removes bytes past `current_offset` left by an earlier failed write.
    fn discard_tail(&mut self) -> StoreResult<()> {
        let len = self
            .file
            .metadata()
            .map_err(|e| StoreError::io("Failed to read file metadata", e))?
            .len();

        if len > self.current_offset {
            tracing::warn!(
                path = %self.storage_path.display(),
                offset = self.current_offset,
                stray_bytes = len - self.current_offset,
                "discarding partial journal record"
            );
            self.truncate_to_offset();
            if self.poisoned {
                return Err(StoreError::Unavailable(
                    "failed to discard partial journal record".to_string(),
                ));
            }
        }

        Ok(())
    }

    fn truncate_to_offset(&mut self) {
        let truncated = self
            .file
            .set_len(self.current_offset)
            .and_then(|()| self.file.sync_all());

        if let Err(e) = truncated {
            tracing::error!(
                path = %self.storage_path.display(),
                offset = self.current_offset,
                error = %e,
                "journal truncation failed"
            );
            self.poisoned = true;
        }
    }

    /// Flushes outstanding data before the handle is dropped.
    pub fn sync(&mut self) -> StoreResult<()> {
        self.file
            .sync_all()
            .map_err(|e| StoreError::io("fsync failed on close", e))
    }
}
