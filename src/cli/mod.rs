//! Command-line interface for focusbar.

pub mod args;
pub mod commands;
