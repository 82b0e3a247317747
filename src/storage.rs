//! JSON document files exported from the backend.

use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A backend document (plan or alert feed) stored as a JSON file.
#[derive(Debug, Clone)]
pub struct DocumentFile {
    path: PathBuf,
}

impl DocumentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the raw document tree.
    pub fn load(&self) -> Result<Value, StorageError> {
        let contents =
            fs::read_to_string(&self.path).map_err(|e| StorageError::IoError(self.path.clone(), e))?;
        serde_json::from_str(&contents)
            .map_err(|e| StorageError::ParseError(self.path.clone(), e.to_string()))
    }

    /// Writes the tree back, replacing the file contents.
    ///
    /// The new contents go to a sibling temp file first and are then renamed
    /// over the original, so a failed write leaves the old document intact.
    pub fn save(&self, tree: &Value) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(tree)
            .map_err(|e| StorageError::ParseError(self.path.clone(), e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|e| StorageError::IoError(tmp_path.clone(), e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| StorageError::IoError(self.path.clone(), e))?;

        tracing::debug!("Saved document {}", self.path.display());
        Ok(())
    }
}

/// Errors that can occur reading or writing document files.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error reading or writing a file.
    IoError(PathBuf, io::Error),
    /// The file is not valid JSON.
    ParseError(PathBuf, String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::IoError(path, e) => {
                write!(f, "I/O error for {}: {}", path.display(), e)
            }
            StorageError::ParseError(path, e) => {
                write!(f, "Failed to parse document {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::IoError(_, e) => Some(e),
            StorageError::ParseError(_, _) => None,
        }
    }
}
