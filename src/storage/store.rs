//! Document store
//!
//! Both collections live in memory in insertion order. On the file backend
//! every write is journaled and fsynced before it is applied, and the journal
//! is replayed on open to rebuild the collections.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::config::StoreConfig;
use super::errors::{StoreError, StoreResult};
use super::query::ExerciseQuery;
use super::reader::StorageReader;
use super::record::{DocumentRecord, RecordKind};
use super::repository::{DeleteSummary, RecordStore};
use super::writer::{journal_path, StorageWriter};
use crate::model::{ExerciseDraft, ExerciseEntry, User};
use crate::observability::Event;

/// Collection holding [`User`] documents
pub const USERS: &str = "users";
/// Collection holding [`ExerciseEntry`] documents
pub const EXERCISES: &str = "exercises";

/// Store handle shared by every request handler.
///
/// Lock order is collection first, then journal.
pub struct DocumentStore {
    config: StoreConfig,
    users: RwLock<Vec<User>>,
    exercises: RwLock<Vec<ExerciseEntry>>,
    journal: Option<Mutex<StorageWriter>>,
    closed: AtomicBool,
}

impl DocumentStore {
    /// Opens the store on the configured backend, replaying the journal if any.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        match config {
            StoreConfig::InMemory => Ok(Self::in_memory()),
            StoreConfig::File { data_dir } => {
                let (users, exercises) = replay(&journal_path(data_dir))?;
                let writer = StorageWriter::open(data_dir)?;
                Ok(Self {
                    config: config.clone(),
                    users: RwLock::new(users),
                    exercises: RwLock::new(exercises),
                    journal: Some(Mutex::new(writer)),
                    closed: AtomicBool::new(false),
                })
            }
        }
    }

    /// Empty store with no persistence
    pub fn in_memory() -> Self {
        Self {
            config: StoreConfig::InMemory,
            users: RwLock::new(Vec::new()),
            exercises: RwLock::new(Vec::new()),
            journal: None,
            closed: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Flushes the journal and refuses further operations. Idempotent.
    pub fn close(&self) -> StoreResult<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        if let Some(journal) = &self.journal {
            let mut writer = journal
                .lock()
                .map_err(|_| StoreError::Unavailable("journal lock poisoned".to_string()))?;
            writer.sync()?;
        }

        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.is_closed() {
            Err(StoreError::Closed)
        } else {
            Ok(())
        }
    }

    fn append(&self, record: &DocumentRecord) -> StoreResult<()> {
        let Some(journal) = &self.journal else {
            return Ok(());
        };

        let mut writer = journal
            .lock()
            .map_err(|_| StoreError::Unavailable("journal lock poisoned".to_string()))?;

        match writer.append(record) {
            Ok(_) => Ok(()),
            Err(e) => {
                // Journal can no longer be trusted; refuse writes rather
                // than acknowledge ones a restart would lose.
                if writer.is_poisoned() && !self.closed.swap(true, Ordering::SeqCst) {
                    tracing::error!(
                        event = Event::StoreClosed.as_str(),
                        error = %e,
                        "journal poisoned, store closed"
                    );
                }
                Err(e)
            }
        }
    }
}

impl RecordStore for DocumentStore {
    fn insert_user(&self, username: &str) -> StoreResult<User> {
        self.ensure_open()?;
        if username.is_empty() {
            return Err(StoreError::required(USERS, "username"));
        }

        let user = User {
            id: new_id(),
            username: username.to_string(),
        };

        let mut users = write(&self.users)?;
        self.append(&DocumentRecord::insert(USERS, &user.id, encode(&user)?))?;
        users.push(user.clone());

        Ok(user)
    }

    fn find_user_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        self.ensure_open()?;
        let users = read(&self.users)?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.ensure_open()?;
        let users = read(&self.users)?;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    fn list_users(&self) -> StoreResult<Vec<User>> {
        self.ensure_open()?;
        Ok(read(&self.users)?.clone())
    }

    fn delete_all_users(&self) -> StoreResult<DeleteSummary> {
        self.ensure_open()?;
        let mut users = write(&self.users)?;
        self.append(&DocumentRecord::clear(USERS))?;

        let count = users.len();
        users.clear();
        Ok(DeleteSummary::deleted(count))
    }

    fn insert_exercise(&self, draft: ExerciseDraft) -> StoreResult<ExerciseEntry> {
        self.ensure_open()?;
        if draft.description.is_empty() {
            return Err(StoreError::required(EXERCISES, "description"));
        }

        let entry = draft.into_entry(new_id());

        let mut exercises = write(&self.exercises)?;
        self.append(&DocumentRecord::insert(
            EXERCISES,
            &entry.id,
            encode(&entry)?,
        ))?;
        exercises.push(entry.clone());

        Ok(entry)
    }

    fn find_exercises(&self, query: &ExerciseQuery) -> StoreResult<Vec<ExerciseEntry>> {
        self.ensure_open()?;
        let exercises = read(&self.exercises)?;
        Ok(query.apply(exercises.iter()))
    }

    fn delete_all_exercises(&self) -> StoreResult<DeleteSummary> {
        self.ensure_open()?;
        let mut exercises = write(&self.exercises)?;
        self.append(&DocumentRecord::clear(EXERCISES))?;

        let count = exercises.len();
        exercises.clear();
        Ok(DeleteSummary::deleted(count))
    }
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn encode<T: Serialize>(document: &T) -> StoreResult<Vec<u8>> {
    serde_json::to_vec(document)
        .map_err(|e| StoreError::Validation(format!("failed to encode document: {e}")))
}

fn decode<T: DeserializeOwned>(record: &DocumentRecord, offset: u64) -> StoreResult<T> {
    serde_json::from_slice(&record.body).map_err(|e| {
        StoreError::corruption_at_offset(
            offset,
            format!(
                "undecodable {} document {}: {}",
                record.collection, record.document_id, e
            ),
        )
    })
}

fn read<T>(lock: &RwLock<T>) -> StoreResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| StoreError::Unavailable("collection lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> StoreResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| StoreError::Unavailable("collection lock poisoned".to_string()))
}

/// Rebuilds both collections from the journal. A missing journal is empty.
fn replay(path: &Path) -> StoreResult<(Vec<User>, Vec<ExerciseEntry>)> {
    let mut users = Vec::new();
    let mut exercises = Vec::new();

    if !path.exists() {
        return Ok((users, exercises));
    }

    let mut reader = StorageReader::open(path)?;
    loop {
        let offset = reader.current_offset();
        let Some(record) = reader.read_next()? else {
            break;
        };

        match (record.collection.as_str(), record.kind) {
            (USERS, RecordKind::Insert) => users.push(decode(&record, offset)?),
            (USERS, RecordKind::Clear) => users.clear(),
            (EXERCISES, RecordKind::Insert) => exercises.push(decode(&record, offset)?),
            (EXERCISES, RecordKind::Clear) => exercises.clear(),
            (other, _) => {
                return Err(StoreError::corruption_at_offset(
                    offset,
                    format!("unknown collection: {}", other),
                ));
            }
        }
    }

    tracing::info!(
        path = %reader.path().display(),
        users = users.len(),
        exercises = exercises.len(),
        "journal replayed"
    );

    Ok((users, exercises))
}
