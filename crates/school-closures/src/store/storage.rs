//! Key-value storage backends for the record store.

use crate::error::Result;

/// A key-value store holding one text blob per key.
///
/// The record store keeps its whole collection under a single key and
/// rewrites that blob on every append.
pub trait Storage {
    /// Read the blob stored under `key`, or `None` if nothing is stored.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    fn save(&mut self, key: &str, contents: &str) -> Result<()>;

    /// Short description of the backend (for logging).
    fn describe(&self) -> String;
}
