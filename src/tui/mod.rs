//! Terminal User Interface (TUI) for focusbar.
//!
//! Hosts the focus timer as a one-line status bar with click handling,
//! alert popups, a terminal bell for the finish sound and a prompt for
//! the focus length. Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::{App, ALERT_FADE, MAX_TEXT, WIDGET_ID};

use std::io::{self, Write};
use std::sync::mpsc::Receiver;
use std::time::Instant;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;

use crate::config::SessionConfig;
use crate::error::FocusError;
use crate::features::focus::{Tick, Ticker};

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(config: SessionConfig) -> Result<(), FocusError> {
    let mut app = App::new(config);
    let (ticker, ticks) = Ticker::every_second();
    app.timer.start(Box::new(ticker))?;

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| FocusError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| FocusError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| FocusError::Terminal(format!("Failed to create terminal: {e}")))?;

    info!("timer opened");
    let result = run_app(&mut terminal, &mut app, &ticks);
    app.timer.stop();

    // Restore terminal
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();
    info!("timer closed");

    result
}

/// Run the main application loop.
fn run_app<B: Backend + Write>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    ticks: &Receiver<Tick>,
) -> Result<(), FocusError> {
    while !app.should_quit {
        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| FocusError::Terminal(format!("Failed to draw: {e}")))?;

        // Clicks and ticks are both handled here, one at a time
        if let Some(action) = event::handle_events(app)? {
            event::apply(app, action);
        }
        while ticks.try_recv().is_ok() {
            app.tick();
        }
        app.expire_alert(Instant::now());

        if app.take_bell() {
            let backend = terminal.backend_mut();
            backend.write_all(b"\x07")?;
            Write::flush(backend)?;
        }
    }

    Ok(())
}
