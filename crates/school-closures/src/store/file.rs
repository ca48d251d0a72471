//! File-backed storage: one JSON file per key inside a data directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ClosureError, Result};

use super::storage::Storage;

/// Stores each key as `<root>/<key>.json`.
///
/// Writes go to a temporary sibling file that is then renamed over the
/// target, so a failed write never leaves a half-written blob behind.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at a directory. The directory is created on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn check_key(key: &str) -> Result<()> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(ClosureError::persistence(
                key,
                "storage keys must be non-empty and must not contain path separators",
            ));
        }
        Ok(())
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Self::check_key(key)?;
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path).map(Some).map_err(|e| {
            ClosureError::persistence(
                key,
                format!("Failed to read '{}': {}", path.display(), e),
            )
        })
    }

    fn save(&mut self, key: &str, contents: &str) -> Result<()> {
        Self::check_key(key)?;

        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|e| {
                ClosureError::persistence(
                    key,
                    format!(
                        "Failed to create directory '{}': {}",
                        self.root.display(),
                        e
                    ),
                )
            })?;
        }

        let path = self.path_for(key);
        let tmp_path = self.root.join(format!(".{}.json.tmp", key));

        fs::write(&tmp_path, contents).map_err(|e| {
            ClosureError::persistence(
                key,
                format!("Failed to write '{}': {}", tmp_path.display(), e),
            )
        })?;

        fs::rename(&tmp_path, &path).map_err(|e| {
            // Best effort cleanup of the temporary file.
            let _ = fs::remove_file(&tmp_path);
            ClosureError::persistence(
                key,
                format!("Failed to replace '{}': {}", path.display(), e),
            )
        })
    }

    fn describe(&self) -> String {
        format!("file storage at '{}'", self.root.display())
    }
}
