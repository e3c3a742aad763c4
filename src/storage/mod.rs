//! Record store for users and exercise entries
//!
//! Two collections, `users` and `exercises`, held in insertion order. The
//! file backend is an append-only journal:
//!
//! - Checksum-verified on every read
//! - Every write fsynced before it is applied in memory
//! - Bulk deletes are journaled as `Clear` records
//! - Replayed in file order on open; corruption aborts the open

mod checksum;
mod config;
mod errors;
mod query;
mod reader;
mod record;
mod repository;
mod store;
mod writer;

pub use checksum::compute_checksum;
pub use config::StoreConfig;
pub use errors::{Severity, StoreError, StoreResult};
pub use query::ExerciseQuery;
pub use reader::StorageReader;
pub use record::{DocumentRecord, RecordKind};
pub use repository::{DeleteSummary, RecordStore};
pub use store::{DocumentStore, EXERCISES, USERS};
pub use writer::{journal_path, StorageWriter};
