//! Session record commands.
//!
//! Read and change the persisted record without opening the timer.

use chrono::Utc;
use tracing::info;

use crate::cli::args::OutputFormat;
use crate::config::{Paths, SessionConfig, YamlStore};
use crate::error::FocusError;
use crate::features::focus::{EventQueue, FocusTimer};
use crate::output::{format_state, format_status, StatusReport};

/// Open the session record stored under `paths`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the record
/// cannot be read.
pub fn open_config(paths: &Paths) -> Result<SessionConfig, FocusError> {
    paths.ensure_dirs()?;
    SessionConfig::open(Box::new(YamlStore::new(&paths.state_file)))
}

/// Show the completed session count and settings.
///
/// # Errors
///
/// Returns an error if the record cannot be opened or output formatting fails.
pub fn status(paths: &Paths, format: OutputFormat) -> Result<String, FocusError> {
    let timer = FocusTimer::new(open_config(paths)?, EventQueue::new());
    let report = StatusReport::new(
        timer.config().load(),
        timer.render_tooltip(),
        timer.reset_on_open(),
    );
    format_status(&report, format)
}

/// Set the focus session length from user input.
///
/// # Errors
///
/// Returns a validation error for input that is not a positive whole
/// number (the record is left untouched), or a store error.
pub fn set_length(paths: &Paths, input: &str, format: OutputFormat) -> Result<String, FocusError> {
    let mut config = open_config(paths)?;
    let minutes = config.set_focus_length_input(input)?;
    info!(minutes, "focus length changed");
    format_state(
        &format!("Focus length set to {minutes} min"),
        &config.load(),
        format,
    )
}

/// Zero the completed session count.
///
/// # Errors
///
/// Returns an error if the record cannot be opened or saved.
pub fn reset(paths: &Paths, format: OutputFormat) -> Result<String, FocusError> {
    let mut config = open_config(paths)?;
    let previous = config.load().completed_session_count;
    config.reset_count(Utc::now())?;
    info!(previous, "session count reset");
    format_state("Completed session count reset", &config.load(), format)
}
