//! Play and phase states of the focus timer.

use std::fmt;

/// Whether a countdown is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayState {
    /// No countdown; the next click starts a focus session.
    #[default]
    Idle,
    /// Counting down.
    Running,
    /// Countdown started but held.
    Paused,
}

impl PlayState {
    /// Glyph shown in front of the countdown.
    ///
    /// The glyph hints at what a click will do: a running timer shows the
    /// pause bars, a paused timer shows the play arrow.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Running => "||",
            Self::Paused => "▶",
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for PlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which interval the countdown belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Counted focus interval.
    #[default]
    Work,
    /// Fixed pause after a completed focus interval.
    Break,
}

impl Phase {
    /// Marker appended to the countdown text.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Work => "",
            Self::Break => "★",
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Break => "break",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
