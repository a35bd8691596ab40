//! Error classification for repository operations
//!
//! Transient conflicts (unique violations, serialization failures) get
//! their own `DomainError` variants so `RetryCoordinator` can recognize
//! them. Classification prefers structured driver information (SQLSTATE
//! codes) and only falls back to message-pattern matching for drivers
//! that expose nothing better; the fallback strings are a portability
//! risk when changing storage backends.

use geoquiz_core::error::DomainError;
use sqlx::Error as SqlxError;

/// SQLSTATE codes for optimistic-concurrency style conflicts
const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";

/// Message fragments recognized as unique-constraint violations when no
/// structured code is available
const UNIQUE_PATTERNS: [&str; 3] = ["unique constraint", "duplicate", "unique index"];

/// Convert a SQLx error to a DomainError, classifying transient conflicts
pub fn classify_db_error(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return DomainError::UniqueViolation(db_err.message().to_string());
        }

        if let Some(code) = db_err.code() {
            if code == SERIALIZATION_FAILURE || code == DEADLOCK_DETECTED {
                return DomainError::ConcurrencyConflict(db_err.message().to_string());
            }
        }

        // Fallback: text matching for drivers without structured codes
        let message = db_err.message().to_lowercase();
        if UNIQUE_PATTERNS.iter().any(|p| message.contains(p)) {
            return DomainError::UniqueViolation(db_err.message().to_string());
        }
    }

    DomainError::DatabaseError(e.to_string())
}

/// Convert a SQLx error to a DomainError without conflict classification,
/// for reads where a unique violation cannot occur
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}
