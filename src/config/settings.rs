//! The durable session record and its owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::store::{MemoryStore, StateStore};
use crate::error::{FocusError, ValidationError};

/// Persisted counters and settings.
///
/// A plain value: every change goes through
/// [`SessionConfig::save`] with a whole new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    /// Focus sessions finished since the last daily reset.
    pub completed_session_count: u32,
    /// Last activity that counts toward the daily reset check.
    pub last_activity: DateTime<Utc>,
    /// Length of a focus session in minutes. Always positive.
    pub focus_length_minutes: u32,
}

/// Longest accepted focus session, one day.
pub const MAX_FOCUS_MINUTES: u32 = 24 * 60;

const fn default_focus_length() -> u32 {
    25
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            completed_session_count: 0,
            last_activity: DateTime::<Utc>::UNIX_EPOCH,
            focus_length_minutes: default_focus_length(),
        }
    }
}

/// Parse a user-entered focus length.
///
/// # Errors
///
/// Returns [`ValidationError`] if the text is not an integer or is not positive.
pub fn parse_focus_length(input: &str) -> Result<u32, ValidationError> {
    let trimmed = input.trim();
    let minutes: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotANumber(trimmed.to_string()))?;
    validate_focus_length(minutes)
}

fn validate_focus_length(minutes: i64) -> Result<u32, ValidationError> {
    if minutes <= 0 {
        return Err(ValidationError::NotPositive(minutes));
    }
    if minutes > i64::from(MAX_FOCUS_MINUTES) {
        return Err(ValidationError::TooLong(minutes));
    }
    u32::try_from(minutes).map_err(|_| ValidationError::TooLong(minutes))
}

/// Owner of the session record and its backing store.
pub struct SessionConfig {
    store: Box<dyn StateStore>,
    state: SessionState,
}

impl SessionConfig {
    /// Load the record from a store, using defaults if nothing was saved.
    ///
    /// A stored focus length outside `1..=MAX_FOCUS_MINUTES` is replaced by
    /// the default; the other fields are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn open(store: Box<dyn StateStore>) -> Result<Self, FocusError> {
        let mut state = store.load()?.unwrap_or_default();
        if let Err(e) = validate_focus_length(i64::from(state.focus_length_minutes)) {
            warn!(error = %e, "stored focus length ignored, using the default");
            state.focus_length_minutes = default_focus_length();
        }
        debug!(
            count = state.completed_session_count,
            length = state.focus_length_minutes,
            "session record loaded"
        );
        Ok(Self { store, state })
    }

    /// A config backed by a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            store: Box::new(MemoryStore::new()),
            state: SessionState::default(),
        }
    }

    /// Current record.
    #[must_use]
    pub const fn load(&self) -> SessionState {
        self.state
    }

    /// Replace the whole record and persist it.
    ///
    /// The in-memory record is replaced even if persisting fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the write.
    pub fn save(&mut self, state: SessionState) -> Result<(), FocusError> {
        self.state = state;
        self.store.save(&self.state)
    }

    /// Change the focus session length.
    ///
    /// # Errors
    ///
    /// Returns [`FocusError::Validation`] if `minutes` is not positive, leaving
    /// the record untouched, or a store error if persisting fails.
    pub fn set_focus_length(&mut self, minutes: i64) -> Result<(), FocusError> {
        let minutes = validate_focus_length(minutes)?;
        self.save(SessionState {
            focus_length_minutes: minutes,
            ..self.state
        })
    }

    /// Change the focus session length from raw user input.
    ///
    /// # Errors
    ///
    /// Same as [`Self::set_focus_length`], plus a validation error for
    /// input that is not a number.
    pub fn set_focus_length_input(&mut self, input: &str) -> Result<u32, FocusError> {
        let minutes = parse_focus_length(input)?;
        self.set_focus_length(i64::from(minutes))?;
        Ok(minutes)
    }

    /// Zero the completed-session count.
    ///
    /// # Errors
    ///
    /// Returns an error if persisting fails.
    pub fn reset_count(&mut self, now: DateTime<Utc>) -> Result<(), FocusError> {
        self.save(SessionState {
            completed_session_count: 0,
            last_activity: now,
            ..self.state
        })
    }
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
