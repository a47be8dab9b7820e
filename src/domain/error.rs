use thiserror::Error;

/// Rejected write: the record cannot be constructed from the given input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingRequiredField(&'static str),

    #[error("password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    /// Carries the offending value as it was received.
    #[error("likes must be a non-negative integer, got {0}")]
    InvalidLikesValue(String),
}
