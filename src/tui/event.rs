//! Event handling for the TUI.

use std::time::Duration;

use chrono::Utc;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use crate::error::FocusError;
use crate::tui::app::App;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Click the timer.
    Click,
}

/// Handle terminal events.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails or the focus length cannot be saved.
pub fn handle_events(app: &mut App) -> Result<Option<Action>, FocusError> {
    // Poll for events with a small timeout
    if !event::poll(Duration::from_millis(100))
        .map_err(|e| FocusError::Terminal(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    match event::read().map_err(|e| FocusError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            if app.close_error() {
                Ok(None)
            } else {
                Ok(Some(Action::Click))
            }
        }
        _ => Ok(None),
    }
}

/// Map a key press to an action.
///
/// # Errors
///
/// Returns an error if the focus length cannot be saved.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Result<Option<Action>, FocusError> {
    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(Some(Action::Quit));
    }

    // Prompt swallows everything while open
    if let Some(input) = app.prompt.as_mut() {
        match key.code {
            KeyCode::Enter => app.submit_prompt()?,
            KeyCode::Esc => app.cancel_prompt(),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) => input.push(c),
            _ => {}
        }
        return Ok(None);
    }

    if key.code == KeyCode::Char('q') {
        return Ok(Some(Action::Quit));
    }

    // The error dialog takes the first key, clicks included
    if app.close_error() {
        return Ok(None);
    }

    // Alerts never hold back a click
    if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
        return Ok(Some(Action::Click));
    }

    if app.dismiss() {
        return Ok(None);
    }

    match key.code {
        KeyCode::Esc => Ok(Some(Action::Quit)),
        KeyCode::Char('s') => {
            app.open_prompt();
            Ok(None)
        }
        KeyCode::Char('?') => {
            app.status = Some("space/click:start-pause | double:reset | s:length | q:quit".to_string());
            Ok(None)
        }
        _ => Ok(None),
    }
}

/// Apply an action to the app.
pub fn apply(app: &mut App, action: Action) {
    match action {
        Action::Quit => app.should_quit = true,
        Action::Click => app.click(Utc::now()),
    }
}
