//! Feature implementations for focusbar.
//!
//! - Focus timer state machine and its tick driver

pub mod focus;
