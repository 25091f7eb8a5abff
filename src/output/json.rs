//! JSON output formatting for focusbar.

use serde_json::json;

use super::StatusReport;
use crate::config::SessionState;
use crate::error::FocusError;

/// Format a status report as JSON
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_status_json(report: &StatusReport) -> Result<String, FocusError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Format the session record as JSON
///
/// # Errors
///
/// Returns `FocusError::Parse` if JSON serialization fails.
pub fn format_state_json(state: &SessionState) -> Result<String, FocusError> {
    let output = json!({
        "completed_session_count": state.completed_session_count,
        "focus_length_minutes": state.focus_length_minutes,
        "last_activity": state.last_activity,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}
