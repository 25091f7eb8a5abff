//! Output formatting for focusbar.
//!
//! Formats the persisted session record for the non-interactive commands.

mod json;
mod pretty;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::config::SessionState;
use crate::error::FocusError;

pub use json::*;
pub use pretty::*;

/// Snapshot of the session record as shown by `focusbar status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Sessions completed since the last daily reset.
    pub completed_session_count: u32,
    /// Configured focus length.
    pub focus_length_minutes: u32,
    /// Last recorded activity.
    pub last_activity: DateTime<Utc>,
    /// Tooltip text as the status line would show it.
    pub tooltip: String,
    /// Whether opening the record triggered a daily reset.
    pub daily_reset: bool,
}

impl StatusReport {
    /// Build a report from a record and the rendered tooltip.
    #[must_use]
    pub fn new(state: SessionState, tooltip: String, daily_reset: bool) -> Self {
        Self {
            completed_session_count: state.completed_session_count,
            focus_length_minutes: state.focus_length_minutes,
            last_activity: state.last_activity,
            tooltip,
            daily_reset,
        }
    }
}

/// Format a status report based on output format
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_status(report: &StatusReport, format: OutputFormat) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_status_pretty(report)),
        OutputFormat::Json => format_status_json(report),
    }
}

/// Format the result of a record change based on output format
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_state(
    message: &str,
    state: &SessionState,
    format: OutputFormat,
) -> Result<String, FocusError> {
    match format {
        OutputFormat::Pretty => Ok(format_state_pretty(message, state)),
        OutputFormat::Json => format_state_json(state),
    }
}
