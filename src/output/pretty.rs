use chrono::{DateTime, Utc};
use colored::Colorize;

use super::StatusReport;
use crate::config::SessionState;

/// Format a status report as pretty output
pub fn format_status_pretty(report: &StatusReport) -> String {
    let mut output = format!("{}\n", report.tooltip.bold());
    output.push_str(&format!(
        "  {}: {} min\n",
        "Focus length".dimmed(),
        report.focus_length_minutes
    ));
    output.push_str(&format!(
        "  {}: {}",
        "Last activity".dimmed(),
        format_activity(report.last_activity)
    ));

    if report.daily_reset {
        output.push_str(&format!("\n  {}", "Count reset for a new day".yellow()));
    }

    output
}

/// Format a changed record as pretty output
pub fn format_state_pretty(message: &str, state: &SessionState) -> String {
    format!(
        "{}\n  {}: {} min\n  {}: {}",
        message.green(),
        "Focus length".dimmed(),
        state.focus_length_minutes,
        "Completed".dimmed(),
        state.completed_session_count
    )
}

fn format_activity(at: DateTime<Utc>) -> String {
    if at == DateTime::<Utc>::UNIX_EPOCH {
        "never".to_string()
    } else {
        at.with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }
}
