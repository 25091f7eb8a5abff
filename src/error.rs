//! Error types for focusbar.

use thiserror::Error;

/// Rejected settings input.
///
/// Raised at the settings boundary only; the timer state is never touched
/// when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input could not be read as a whole number.
    #[error("'{0}' is not a whole number of minutes")]
    NotANumber(String),

    /// The number was zero or negative.
    #[error("focus length must be a positive number of minutes, got {0}")]
    NotPositive(i64),

    /// The number was longer than a day.
    #[error("focus length must be at most 1440 minutes, got {0}")]
    TooLong(i64),
}

/// Main error type for focusbar.
#[derive(Debug, Error)]
pub enum FocusError {
    /// Persistence store or path resolution failed.
    #[error("Config error: {0}")]
    Config(String),

    /// Settings input was invalid.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Terminal backend failure.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Output serialization failed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Raw I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for FocusError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl FocusError {
    /// Whether this error came from user input rather than the environment.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let err = ValidationError::NotANumber("abc".to_string());
        assert_eq!(err.to_string(), "'abc' is not a whole number of minutes");

        let err = ValidationError::NotPositive(-5);
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    fn test_from_validation() {
        let err: FocusError = ValidationError::NotPositive(0).into();
        assert!(err.is_validation());
        assert!(err.to_string().starts_with("Invalid input"));
    }

    #[test]
    fn test_config_is_not_validation() {
        let err = FocusError::Config("disk full".to_string());
        assert!(!err.is_validation());
    }
}
