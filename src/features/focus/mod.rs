//! Focus timer.
//!
//! Provides the Pomodoro-style countdown behind the status line:
//! - Click to start, pause and resume; double-click to abandon
//! - Fixed five minute break after each completed session
//! - Completed-session counter that resets after a long idle gap
//! - Tick driver and listener seams for the host

pub mod driver;
pub mod listener;
pub mod state;
pub mod timer;

pub use driver::{PeriodicDriver, Tick, Ticker};
pub use listener::{EventQueue, FocusEvent, FocusListener};
pub use state::{Phase, PlayState};
pub use timer::{
    format_mmss, FocusTimer, BREAK_MINUTES, DAILY_RESET_HOURS, DOUBLE_CLICK_MS, IDLE_TEXT,
};
