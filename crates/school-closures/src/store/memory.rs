//! In-memory storage for tests and throwaway sessions.

use std::collections::HashMap;

use crate::error::{ClosureError, Result};

use super::storage::Storage;

/// Storage that keeps blobs in a map.
///
/// Writes can be made to fail on demand to exercise the store's handling of
/// a full or unavailable backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw blob under `key`.
    pub fn with_entry(mut self, key: impl Into<String>, contents: impl Into<String>) -> Self {
        self.entries.insert(key.into(), contents.into());
        self
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Raw blob currently stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, contents: &str) -> Result<()> {
        if self.fail_writes {
            return Err(ClosureError::persistence(key, "storage quota exceeded"));
        }
        self.entries.insert(key.to_string(), contents.to_string());
        self.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory storage".to_string()
    }
}
