//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Invalid game type: {0}")]
    InvalidGameType(String),

    #[error("Answer counts must not be negative")]
    NegativeAnswerCount,

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    /// Wrong email or password; deliberately identical for both cases
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Uniform for not-found, expired, revoked, and replayed tokens
    #[error("invalid or expired refresh token")]
    InvalidRefreshToken,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Transient Persistence Conflicts (retryable)
    // =========================================================================
    /// Unique-constraint violation surfaced by the store
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Optimistic-concurrency conflict (row changed between read and write)
    #[error("Concurrency conflict: {0}")]
    ConcurrencyConflict(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::InvalidGameType(_) => "INVALID_GAME_TYPE",
            Self::NegativeAnswerCount => "NEGATIVE_ANSWER_COUNT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UniqueViolation(_) => "UNIQUE_VIOLATION",
            Self::ConcurrencyConflict(_) => "CONCURRENCY_CONFLICT",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::InvalidGameType(_)
                | Self::NegativeAnswerCount
        )
    }

    /// Check if this is an authentication error
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::InvalidCredentials | Self::InvalidRefreshToken)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists)
    }

    /// Check if this is a transient persistence conflict that a retry
    /// coordinator may absorb
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::UniqueViolation(_) | Self::ConcurrencyConflict(_))
    }
}
