//! Append-only record store.
//!
//! The store keeps an in-memory mirror of every record and writes the whole
//! collection back to its [`Storage`] after each append. Records are never
//! updated or removed.
//!
//! # Usage
//!
//! ```
//! use school_closures::store::{MemoryStorage, RecordStore};
//! use school_closures::{validate, ClosureForm, FormField};
//!
//! let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
//!
//! let form = ClosureForm::new()
//!     .with_field(FormField::SchoolName, "Zilla Parishad School")
//!     .with_field(FormField::District, "Pune")
//!     .with_field(FormField::Village, "Shirur")
//!     .with_field(FormField::YearOfClosure, "2022")
//!     .with_field(FormField::ReasonForClosure, "Low student enrollment")
//!     .with_field(FormField::StudentsBeforeClosure, "45")
//!     .with_field(FormField::WhereStudentsGo, "Government School, Shirur Town");
//!
//! let record = store.append(validate(&form).unwrap()).unwrap();
//! assert_eq!(store.all().last(), Some(&record));
//! ```

mod file;
mod memory;
mod storage;

use std::collections::HashSet;

use chrono::{NaiveDate, Utc};

use crate::error::{ClosureError, Result};
use crate::record::{ClosureRecord, ValidatedPayload};

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use storage::Storage;

/// Key the record collection is stored under by default.
pub const DEFAULT_STORAGE_KEY: &str = "schoolClosuresData";

/// Suffix of the key an unreadable collection is copied to before the store starts empty.
///
/// Later backups of the same key get a counter: `<key>.corrupt.1`, `<key>.corrupt.2`, ...
pub const CORRUPT_BACKUP_SUFFIX: &str = ".corrupt";

/// Durable, append-only collection of [`ClosureRecord`]s.
#[derive(Debug)]
pub struct RecordStore<S: Storage> {
    storage: S,
    key: String,
    records: Vec<ClosureRecord>,
    ids: HashSet<String>,
    last_id: u64,
    load_warning: Option<String>,
}

impl<S: Storage> RecordStore<S> {
    /// Open the store under [`DEFAULT_STORAGE_KEY`].
    pub fn open(storage: S) -> Result<Self> {
        Self::open_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Open the store under a specific key.
    ///
    /// A missing blob yields an empty store. An unreadable blob is copied to
    /// the first free backup key (`<key>.corrupt`, then `<key>.corrupt.1`, ...)
    /// and the store starts empty; [`RecordStore::load_warning`] then describes
    /// what happened. Earlier backups are never overwritten.
    pub fn open_with_key(mut storage: S, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let mut load_warning = None;

        let records = match storage.load(&key)? {
            None => Vec::new(),
            Some(raw) => match decode(&key, &raw) {
                Ok(records) => records,
                Err(e) => {
                    let backup_key = free_backup_key(&storage, &key)?;
                    storage.save(&backup_key, &raw)?;

                    let warning = format!(
                        "Stored records could not be read ({}). Starting with an empty \
                         collection; the unreadable data was kept under '{}'.",
                        e, backup_key
                    );
                    tracing::warn!(key = %key, backup = %backup_key, "{}", warning);
                    load_warning = Some(warning);
                    Vec::new()
                }
            },
        };

        let mut store = Self {
            storage,
            key,
            records: Vec::new(),
            ids: HashSet::new(),
            last_id: 0,
            load_warning,
        };
        store.replace_records(records);

        tracing::debug!(
            key = %store.key,
            records = store.records.len(),
            "opened record store on {}",
            store.storage.describe()
        );

        Ok(store)
    }

    /// Every record, in insertion order.
    pub fn all(&self) -> &[ClosureRecord] {
        &self.records
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&ClosureRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Storage key of the collection.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Warning produced when the stored collection could not be read on open.
    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Append a record dated today (UTC).
    pub fn append(&mut self, payload: ValidatedPayload) -> Result<ClosureRecord> {
        self.append_dated(payload, Utc::now().date_naive())
    }

    /// Append a record with an explicit `dateAdded`.
    ///
    /// The collection is flushed to storage before this returns. If the write
    /// fails, or no unused id is left, the store is left exactly as it was and
    /// the error is returned.
    pub fn append_dated(
        &mut self,
        payload: ValidatedPayload,
        date_added: NaiveDate,
    ) -> Result<ClosureRecord> {
        let numeric_id = self.next_id()?;
        let id = numeric_id.to_string();
        let record = ClosureRecord::from_payload(id.clone(), date_added, payload);

        self.records.push(record.clone());
        if let Err(e) = self.flush() {
            self.records.pop();
            tracing::warn!(key = %self.key, error = %e, "append failed, record discarded");
            return Err(e);
        }

        self.ids.insert(id);
        self.last_id = numeric_id;

        tracing::info!(
            id = %record.id,
            school = %record.school_name,
            total = self.records.len(),
            "appended closure record"
        );

        Ok(record)
    }

    /// Re-read the collection from storage.
    ///
    /// Unlike [`RecordStore::open`], unreadable data is an error here and the
    /// in-memory records are kept.
    pub fn reload(&mut self) -> Result<()> {
        let records = match self.storage.load(&self.key)? {
            None => Vec::new(),
            Some(raw) => decode(&self.key, &raw)?,
        };
        self.replace_records(records);
        Ok(())
    }

    fn replace_records(&mut self, records: Vec<ClosureRecord>) {
        self.ids = records.iter().map(|r| r.id.clone()).collect();
        if self.ids.len() != records.len() {
            tracing::warn!(
                key = %self.key,
                "stored collection contains duplicate ids; new ids will still be unique"
            );
        }
        self.last_id = records
            .iter()
            .filter_map(|r| r.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            .max(self.last_id);
        self.records = records;
    }

    /// Next id: milliseconds since the epoch, bumped past every id already issued.
    fn next_id(&self) -> Result<u64> {
        let exhausted = || ClosureError::persistence(&self.key, "id space exhausted");

        let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let mut candidate = now_ms.max(self.last_id.checked_add(1).ok_or_else(exhausted)?);
        while self.ids.contains(&candidate.to_string()) {
            candidate = candidate.checked_add(1).ok_or_else(exhausted)?;
        }
        Ok(candidate)
    }

    fn flush(&mut self) -> Result<()> {
        let blob = serde_json::to_string(&self.records)?;
        self.storage.save(&self.key, &blob)
    }
}

/// First backup key for `key` that holds nothing yet.
fn free_backup_key<S: Storage>(storage: &S, key: &str) -> Result<String> {
    let base = format!("{}{}", key, CORRUPT_BACKUP_SUFFIX);
    if storage.load(&base)?.is_none() {
        return Ok(base);
    }
    let mut n: u64 = 1;
    loop {
        let candidate = format!("{}.{}", base, n);
        if storage.load(&candidate)?.is_none() {
            return Ok(candidate);
        }
        n = n
            .checked_add(1)
            .ok_or_else(|| ClosureError::persistence(key, "no free backup key"))?;
    }
}

fn decode(key: &str, raw: &str) -> Result<Vec<ClosureRecord>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|e| {
        ClosureError::persistence(key, format!("stored collection is not valid: {}", e))
    })
}
