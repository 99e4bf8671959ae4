//! Persistent storage using redb.
//!
//! The browser page kept its archive in a single local-storage slot holding a
//! JSON array. [`Storage`] reproduces that shape: a `slots` table of named
//! byte values. [`LetterStore`] owns the `ripmind` slot and treats it as the
//! list of buried letters.
//!
//! Every append rewrites the whole list inside one write transaction. Fine for
//! the handful of letters a kiosk collects, not meant to scale.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use redb::{Database, ReadableTable, TableDefinition};
use tracing::{debug, warn};

use crate::error::{LetterError, LetterResult};
use crate::types::{LetterId, LetterRecord};

const SLOTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("slots");

/// Slot holding the RIP MIND archive
pub const ARCHIVE_SLOT: &str = "ripmind";

/// Durable key-value storage with whole-value slots
#[derive(Clone)]
pub struct Storage {
    db: Arc<RwLock<Database>>,
}

impl Storage {
    /// Create a new storage instance at the given path.
    ///
    /// Creates parent directories and the slots table if needed.
    pub fn new(path: impl AsRef<Path>) -> LetterResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SLOTS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
        })
    }

    /// Read a slot. Returns `None` if it was never written.
    pub fn read_slot(&self, name: &str) -> LetterResult<Option<Vec<u8>>> {
        let db = self.db.read();
        let read_txn = db.begin_read()?;
        let table = read_txn.open_table(SLOTS_TABLE)?;

        Ok(table.get(name)?.map(|v| v.value().to_vec()))
    }

    /// Replace a slot's value.
    pub fn write_slot(&self, name: &str, value: &[u8]) -> LetterResult<()> {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(SLOTS_TABLE)?;
            table.insert(name, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Read-modify-write a slot inside a single write transaction.
    ///
    /// `update` receives the current value (if any) and returns the new one.
    /// If it fails, nothing is written.
    pub fn update_slot<F>(&self, name: &str, update: F) -> LetterResult<()>
    where
        F: FnOnce(Option<&[u8]>) -> LetterResult<Vec<u8>>,
    {
        let db = self.db.read();
        let write_txn = db.begin_write()?;
        {
            let mut table = write_txn.open_table(SLOTS_TABLE)?;
            let next = {
                let current = table.get(name)?;
                update(current.as_ref().map(|v| v.value()))?
            };
            table.insert(name, next.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

/// The RIP MIND archive: every buried letter, stored as one JSON list.
#[derive(Clone)]
pub struct LetterStore {
    storage: Storage,
}

impl LetterStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Open (or create) the archive database at `path`.
    pub fn open(path: impl AsRef<Path>) -> LetterResult<Self> {
        Ok(Self::new(Storage::new(path)?))
    }

    /// All letters in storage order.
    ///
    /// Missing, malformed or unreadable data yields an empty list.
    pub fn load(&self) -> Vec<LetterRecord> {
        let raw = match self.storage.read_slot(ARCHIVE_SLOT) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read letter archive: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(letters) => letters,
            Err(e) => {
                warn!("Letter archive is malformed, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Append a letter to the archive.
    ///
    /// Fails with [`LetterError::DuplicateLetter`] if the id is already present.
    /// If the existing list does not parse, nothing is written and
    /// [`LetterError::Serialization`] is returned.
    pub fn append(&self, record: &LetterRecord) -> LetterResult<()> {
        self.storage.update_slot(ARCHIVE_SLOT, |current| {
            let mut letters: Vec<LetterRecord> = match current {
                Some(raw) => serde_json::from_slice(raw).map_err(|e| {
                    warn!("Refusing to append to malformed letter archive: {}", e);
                    LetterError::Serialization(e.to_string())
                })?,
                None => Vec::new(),
            };

            if letters.iter().any(|l| l.id == record.id) {
                return Err(LetterError::DuplicateLetter(record.id.to_string()));
            }

            letters.push(record.clone());
            serde_json::to_vec(&letters).map_err(|e| LetterError::Serialization(e.to_string()))
        })?;

        debug!(id = %record.id, "Letter archived");
        Ok(())
    }

    /// Look up a single letter by id.
    pub fn find(&self, id: &LetterId) -> Option<LetterRecord> {
        self.load().into_iter().find(|l| &l.id == id)
    }

    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Underlying slot storage
    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}
