//! Log setup.
//!
//! Everything in the crate logs through `tracing`; this installs the
//! subscriber for the binary.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::FocusError;

/// Environment variable holding an explicit filter, e.g. `focusbar=debug`.
pub const LOG_ENV: &str = "FOCUSBAR_LOG";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error, for one-shot commands.
    Stderr,
    /// Append to a file, for the full-screen TUI.
    File(PathBuf),
}

/// Filter level for a `-v` count.
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// `FOCUSBAR_LOG` wins over `verbosity` when set. An already installed
/// subscriber is left in place.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init(verbosity: u8, target: &LogTarget) -> Result<(), FocusError> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    FocusError::Config(format!(
                        "Failed to open log file {}: {e}",
                        path.display()
                    ))
                })?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    if installed.is_err() {
        tracing::debug!("log subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), "warn");
        assert_eq!(level_for(1), "info");
        assert_eq!(level_for(2), "debug");
        assert_eq!(level_for(9), "trace");
    }

    #[test]
    fn test_init_file_target_creates_log() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("focusbar.log");

        init(2, &LogTarget::File(path.clone())).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_init_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("focusbar.log");

        assert!(init(0, &LogTarget::File(path)).is_err());
    }
}
