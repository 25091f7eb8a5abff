//! Path resolution for focusbar data files.
//!
//! All focusbar data is stored in `~/.focusbar/` unless overridden:
//! - `state.yaml` - Session counter and focus length
//! - `focusbar.log` - Log output while the TUI is running

use std::path::PathBuf;

use crate::error::FocusError;

/// Paths to focusbar data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.focusbar/`
    pub root: PathBuf,
    /// Persisted session state: `~/.focusbar/state.yaml`
    pub state_file: PathBuf,
    /// Log file: `~/.focusbar/focusbar.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, FocusError> {
        let home = std::env::var("HOME")
            .map_err(|_| FocusError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".focusbar")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            state_file: root.join("state.yaml"),
            log_file: root.join("focusbar.log"),
            root,
        }
    }

    /// Resolve paths from an optional override, falling back to the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is given and the home directory
    /// cannot be determined.
    pub fn resolve(root: Option<PathBuf>) -> Result<Self, FocusError> {
        root.map_or_else(Self::new, |r| Ok(Self::with_root(r)))
    }

    /// Ensure the data directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), FocusError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                FocusError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-focusbar");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.state_file, root.join("state.yaml"));
        assert_eq!(paths.log_file, root.join("focusbar.log"));
    }

    #[test]
    fn test_resolve_prefers_override() {
        let root = PathBuf::from("/tmp/elsewhere");
        let paths = Paths::resolve(Some(root.clone())).unwrap();
        assert_eq!(paths.root, root);
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("nested").join("focusbar"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.exists());

        // Second call is a no-op
        paths.ensure_dirs().unwrap();
    }
}
