//! focusbar - A Pomodoro-style focus timer
//!
//! This crate provides the focus timer state machine, the persisted
//! session record it counts into, and a terminal status-bar host.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use config::{SessionConfig, SessionState};
pub use error::{FocusError, ValidationError};
pub use features::focus::FocusTimer;
