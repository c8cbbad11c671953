use std::{
    fmt::Display,
    io::ErrorKind,
    path::PathBuf,
};

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Documents known to the store. Each key maps to exactly one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKey {
    Timer,
    Focus,
}

impl StateKey {
    pub fn file_name(self) -> &'static str {
        match self {
            StateKey::Timer => "timer.json",
            StateKey::Focus => "focus.json",
        }
    }
}

impl Display for StateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateKey::Timer => write!(f, "timer"),
            StateKey::Focus => write!(f, "focus list"),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Corrupt json {key}")]
    Corrupt {
        key: StateKey,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode {key}")]
    Encode {
        key: StateKey,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to access {key} file")]
    Io {
        key: StateKey,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    fn io(key: StateKey) -> impl FnOnce(std::io::Error) -> StoreError {
        move |source| StoreError::Io { key, source }
    }
}

/// Whole-file JSON storage rooted in a single directory.
pub struct StateStore {
    state_dir: PathBuf,
}

impl StateStore {
    pub fn new(state_dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&state_dir)?;

        Ok(Self { state_dir })
    }

    pub fn path_of(&self, key: StateKey) -> PathBuf {
        self.state_dir.join(key.file_name())
    }

    /// Reads a document. A missing file is `Ok(None)`.
    pub async fn load<T: DeserializeOwned>(&self, key: StateKey) -> Result<Option<T>, StoreError> {
        let path = self.path_of(key);
        debug!("Loading {path:?}");
        let content = match tokio::fs::read(&path).await {
            Ok(v) => v,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(key)(e)),
        };

        match serde_json::from_slice::<T>(&content) {
            Ok(v) => Ok(Some(v)),
            Err(source) => {
                warn!("Found illegal json in {path:?}: {source}");
                Err(StoreError::Corrupt { key, source })
            }
        }
    }

    /// Overwrites the whole document.
    pub async fn save<T: Serialize>(&self, key: StateKey, value: &T) -> Result<(), StoreError> {
        let path = self.path_of(key);
        debug!("Saving {path:?}");
        let buffer =
            serde_json::to_vec_pretty(value).map_err(|source| StoreError::Encode { key, source })?;
        tokio::fs::write(&path, buffer)
            .await
            .map_err(StoreError::io(key))
    }

    /// Removes the document and returns whether it existed. Removing a missing document is not
    /// an error.
    pub async fn delete(&self, key: StateKey) -> Result<bool, StoreError> {
        let path = self.path_of(key);
        debug!("Deleting {path:?}");
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(key)(e)),
        }
    }

    /// Like [StateStore::load], but writes `T::default()` to disk first if the document is
    /// missing.
    pub async fn load_or_init<T>(&self, key: StateKey) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        match self.load(key).await? {
            Some(v) => Ok(v),
            None => {
                let value = T::default();
                self.save(key, &value).await?;
                Ok(value)
            }
        }
    }
}
