use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Key → JSON-blob persistence, one file per key, rooted at the site's
/// `store/` directory.
///
/// Keys are the same names the site uses in browser storage ("blogs",
/// "tags", "users", "profile", "profilePic", "username"), so the on-disk
/// layout maps one-to-one onto the persisted-state contract.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: PathBuf) -> Self {
        Store { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Whether a value has ever been persisted under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    /// Read and deserialize the value under `key`. A missing key is `None`;
    /// a present but malformed value is an error (an unrecoverable
    /// configuration problem, not a soft miss).
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::ReadError { path, source: e }),
        };
        let value = serde_json::from_str(&text).map_err(|e| StoreError::Malformed {
            path,
            source: e,
        })?;
        Ok(Some(value))
    }

    /// Serialize `value` under `key`, replacing any previous value.
    ///
    /// Writes go to a temp file in the store directory and are renamed into
    /// place, so a crash mid-write can never leave a truncated blob.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path_for(key);
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::WriteError {
            path: self.dir.clone(),
            source: e,
        })?;

        let json = serde_json::to_string_pretty(value).map_err(|e| StoreError::Malformed {
            path: path.clone(),
            source: e,
        })?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(|e| {
            StoreError::WriteError {
                path: path.clone(),
                source: e,
            }
        })?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| tmp.write_all(b"\n"))
            .map_err(|e| StoreError::WriteError {
                path: path.clone(),
                source: e,
            })?;
        tmp.persist(&path).map_err(|e| StoreError::WriteError {
            path,
            source: e.error,
        })?;
        Ok(())
    }
}
