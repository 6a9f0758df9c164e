//! JSON collection files
//!
//! Each repository owns one [`DataFile`] under the data directory. Saves go
//! through a sibling `.tmp` file that is synced and renamed over the target,
//! so a collection on disk is always either the old or the new version.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, trace};

use crate::error::{LedgerError, LedgerResult};

fn storage_error(action: &str, path: &Path, err: impl Display) -> LedgerError {
    LedgerError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// A JSON file holding one collection of ledger records
#[derive(Debug, Clone)]
pub struct DataFile {
    path: PathBuf,
}

impl DataFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    /// Load the collection; a missing or blank file is an empty collection
    pub fn load<T>(&self) -> LedgerResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                trace!(path = %self.path.display(), "no data file yet");
                return Ok(T::default());
            }
            Err(e) => return Err(storage_error("read", &self.path, e)),
        };

        if contents.trim().is_empty() {
            debug!(path = %self.path.display(), "blank data file treated as empty");
            return Ok(T::default());
        }

        serde_json::from_str(&contents).map_err(|e| storage_error("parse", &self.path, e))
    }

    /// Replace the file's contents with `data`
    pub fn store<T: Serialize>(&self, data: &T) -> LedgerResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| storage_error("create directory", parent, e))?;
        }

        let bytes = serde_json::to_vec_pretty(data)
            .map_err(|e| storage_error("serialize data for", &self.path, e))?;

        let temp_path = self.temp_path();
        if temp_path.exists() {
            debug!(path = %temp_path.display(), "replacing leftover temp file");
        }

        let mut file =
            File::create(&temp_path).map_err(|e| storage_error("create", &temp_path, e))?;
        file.write_all(&bytes)
            .and_then(|()| file.sync_all())
            .map_err(|e| storage_error("write", &temp_path, e))?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            storage_error("replace", &self.path, e)
        })?;

        trace!(path = %self.path.display(), bytes = bytes.len(), "data file written");
        Ok(())
    }
}
