//! Command implementations for focusbar.
//!
//! This module contains the implementation of the one-shot CLI commands.
//! The interactive timer lives in [`crate::tui`].

mod focus;
mod shell;

pub use focus::{open_config, reset, set_length, status};
pub use shell::completions;
