//! Persistence backends for the session record.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config::SessionState;
use crate::error::FocusError;

/// Durable storage for a single [`SessionState`] record.
///
/// A store only ever reads or writes the whole record.
pub trait StateStore: Send {
    /// Read the persisted record, or `None` if nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage exists but cannot be read.
    fn load(&self) -> Result<Option<SessionState>, FocusError>;

    /// Replace the persisted record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save(&self, state: &SessionState) -> Result<(), FocusError>;
}

/// YAML file store.
#[derive(Debug, Clone)]
pub struct YamlStore {
    path: PathBuf,
}

impl YamlStore {
    /// Create a store backed by the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for YamlStore {
    fn load(&self) -> Result<Option<SessionState>, FocusError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            FocusError::Config(format!(
                "Failed to read state file {}: {e}",
                self.path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map(Some).map_err(|e| {
            FocusError::Config(format!(
                "Failed to parse state file {}: {e}",
                self.path.display()
            ))
        })
    }

    fn save(&self, state: &SessionState) -> Result<(), FocusError> {
        let contents = serde_yaml::to_string(state)
            .map_err(|e| FocusError::Config(format!("Failed to serialize state: {e}")))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    FocusError::Config(format!(
                        "Failed to create directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        // Write then rename so readers never see a half-written record.
        let tmp = self.temp_path();
        std::fs::write(&tmp, contents).map_err(|e| {
            FocusError::Config(format!("Failed to write state file {}: {e}", tmp.display()))
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            FocusError::Config(format!(
                "Failed to replace state file {}: {e}",
                self.path.display()
            ))
        })
    }
}

/// In-process store.
///
/// Clones share the same slot, so a handle kept outside a
/// [`SessionConfig`](crate::config::SessionConfig) observes every save.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<SessionState>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a record.
    #[must_use]
    pub fn with_state(state: SessionState) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(state))),
        }
    }

    /// The last saved record, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<SessionState> {
        self.slot.lock().ok().and_then(|slot| *slot)
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<SessionState>, FocusError> {
        self.slot
            .lock()
            .map(|slot| *slot)
            .map_err(|_| FocusError::Config("State store lock poisoned".to_string()))
    }

    fn save(&self, state: &SessionState) -> Result<(), FocusError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| FocusError::Config("State store lock poisoned".to_string()))?;
        *slot = Some(*state);
        Ok(())
    }
}
