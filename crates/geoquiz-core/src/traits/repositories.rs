//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL or in-memory).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{GameSession, RefreshToken, User};
use crate::error::DomainError;
use crate::value_objects::{GameType, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find a batch of users by ID
    async fn find_many(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Check if email is already taken (case-insensitive)
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    ///
    /// Returns `DomainError::UniqueViolation` if the email is already taken
    /// at commit time.
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()>;

    /// Record a successful login
    async fn update_last_login(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()>;
}

// ============================================================================
// Refresh Token Repository
// ============================================================================

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Find a token row by its opaque value, regardless of state
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshToken>>;

    /// Persist a freshly issued token
    async fn create(&self, token: &RefreshToken) -> RepoResult<()>;

    /// Atomically revoke `token` (if still active and unexpired) and insert
    /// `replacement` in the same transaction.
    ///
    /// Returns `Ok(false)` when the token could not be claimed - already
    /// revoked, expired, or unknown. Under concurrent rotation of the same
    /// token the store's row-level conflict detection guarantees at most one
    /// caller observes `true`.
    async fn rotate(&self, token: &str, replacement: &RefreshToken) -> RepoResult<bool>;

    /// Revoke one token; `Ok(false)` if it was not active
    async fn revoke(&self, token: &str) -> RepoResult<bool>;

    /// Revoke every active token of one user; returns the number revoked
    async fn revoke_all_for_user(&self, user_id: Snowflake) -> RepoResult<u64>;

    /// Count active (non-revoked, non-expired) tokens for a user
    async fn count_active_for_user(&self, user_id: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Game Session Repository
// ============================================================================

/// Filter for leaderboard aggregation reads
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaderboardFilter {
    pub game_type: Option<GameType>,
    /// Inclusive lower bound on `session_start_time`
    pub played_since: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait GameSessionRepository: Send + Sync {
    /// Insert one session
    async fn create(&self, session: &GameSession) -> RepoResult<()>;

    /// Insert a batch in a single transaction; returns the number inserted
    async fn create_batch(&self, sessions: &[GameSession]) -> RepoResult<u64>;

    /// All sessions of one user, ordered by `created_at` ascending then
    /// `session_start_time` ascending
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<GameSession>>;

    /// Sessions of one user for one game type, same ordering as `find_by_user`
    async fn find_by_user_and_type(
        &self,
        user_id: Snowflake,
        game_type: GameType,
    ) -> RepoResult<Vec<GameSession>>;

    /// One history page, ordered by `created_at` descending then
    /// `session_start_time` descending
    async fn find_page(&self, user_id: Snowflake, limit: u32, offset: u64)
        -> RepoResult<Vec<GameSession>>;

    /// Sessions matching a leaderboard filter, ordered by `created_at`
    /// ascending (streaks are computed in creation order)
    async fn find_for_leaderboard(&self, filter: LeaderboardFilter)
        -> RepoResult<Vec<GameSession>>;
}
