//! Application state for the TUI.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::FocusError;
use crate::features::focus::{EventQueue, FocusEvent, FocusTimer};

/// Title shown on the status bar block.
pub const WIDGET_ID: &str = "FocusBar";

/// Widest text the status bar is sized for.
pub const MAX_TEXT: &str = "0000000000000";

/// How long an alert stays up unless dismissed.
pub const ALERT_FADE: Duration = Duration::from_millis(7300);

/// Message shown when the settings prompt gets bad input.
pub const INVALID_INPUT: &str = "The input you entered was invalid.";

/// A visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Text to show.
    pub message: String,
    /// When it appeared.
    pub shown_at: Instant,
}

/// Application state.
pub struct App {
    /// The focus timer.
    pub timer: FocusTimer<EventQueue>,
    /// Notification currently on screen.
    pub alert: Option<Alert>,
    /// Text typed into the focus length prompt, when it is open.
    pub prompt: Option<String>,
    /// Error dialog contents.
    pub error: Option<String>,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the app should quit.
    pub should_quit: bool,
    bell: bool,
}

impl App {
    /// Create a new app instance around a loaded session record.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            timer: FocusTimer::new(config, EventQueue::new()),
            alert: None,
            prompt: None,
            error: None,
            status: Some("space:start/pause | s:length | q:quit".to_string()),
            should_quit: false,
            bell: false,
        }
    }

    /// Forward a click to the timer, closing any alert on screen.
    pub fn click(&mut self, now: DateTime<Utc>) {
        self.alert = None;
        self.timer.on_click(now);
        self.pump();
    }

    /// Forward one tick to the timer.
    pub fn tick(&mut self) {
        self.timer.on_tick();
        self.pump();
    }

    /// Move queued timer events into visible state.
    fn pump(&mut self) {
        for event in self.timer.listener_mut().drain() {
            match event {
                FocusEvent::Alert(message) => {
                    debug!(%message, "alert");
                    self.alert = Some(Alert {
                        message,
                        shown_at: Instant::now(),
                    });
                }
                FocusEvent::FinishSound => self.bell = true,
                // Every loop iteration redraws
                FocusEvent::Refresh => {}
            }
        }
    }

    /// Whether the terminal bell should ring, clearing the request.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell)
    }

    /// Drop the alert once it has been up for [`ALERT_FADE`].
    pub fn expire_alert(&mut self, now: Instant) {
        if self
            .alert
            .as_ref()
            .is_some_and(|a| now.saturating_duration_since(a.shown_at) >= ALERT_FADE)
        {
            self.alert = None;
        }
    }

    /// Close the error dialog. Returns whether it was open.
    pub fn close_error(&mut self) -> bool {
        self.error.take().is_some()
    }

    /// Close whatever overlay is on top. Returns whether one was open.
    pub fn dismiss(&mut self) -> bool {
        if self.close_error() {
            return true;
        }
        self.alert.take().is_some()
    }

    /// Open the focus length prompt.
    pub fn open_prompt(&mut self) {
        self.prompt = Some(String::new());
    }

    /// Close the prompt without applying it.
    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    /// Apply the prompt text as the new focus length.
    ///
    /// Invalid input shows an error dialog and changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error only if the record could not be persisted.
    pub fn submit_prompt(&mut self) -> Result<(), FocusError> {
        let Some(input) = self.prompt.take() else {
            return Ok(());
        };

        match self.timer.config_mut().set_focus_length_input(&input) {
            Ok(minutes) => {
                self.status = Some(format!("Focus length set to {minutes} min"));
                Ok(())
            }
            Err(e) if e.is_validation() => {
                debug!(error = %e, "rejected focus length");
                self.error = Some(INVALID_INPUT.to_string());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
