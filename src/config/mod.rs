//! Configuration and persisted state for focusbar.
//!
//! This module owns the single durable record (session count, last
//! activity, focus length) and the stores that keep it across restarts.

mod paths;
mod settings;
mod store;

pub use paths::Paths;
pub use settings::{parse_focus_length, SessionConfig, SessionState, MAX_FOCUS_MINUTES};
pub use store::{MemoryStore, StateStore, YamlStore};
