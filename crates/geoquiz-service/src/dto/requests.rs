//! Request DTOs for the service boundary
//!
//! All request DTOs implement `Deserialize`; the ones carrying free-form
//! input also implement `Validate` for shape checks.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use geoquiz_core::value_objects::{GameType, LeaderboardPeriod, Snowflake};

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,

    #[validate(length(max = 64, message = "Name must be at most 64 characters"))]
    pub name: Option<String>,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Password change request
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ============================================================================
// Progress Requests
// ============================================================================

/// Single completed-session submission
///
/// `game_type` arrives as free text and is validated against the closed set
/// by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveSessionRequest {
    pub game_type: String,
    pub correct_answers: i32,
    pub wrong_answers: i32,
    pub session_start_time: DateTime<Utc>,
    pub session_end_time: Option<DateTime<Utc>>,
    /// Whether this round was just played live. When absent the service
    /// falls back to a near-now heuristic on `session_start_time`.
    #[serde(default)]
    pub is_live_session: Option<bool>,
}

/// One anonymous session in a migration batch
#[derive(Debug, Clone, Deserialize)]
pub struct AnonymousSessionRequest {
    pub game_type: String,
    pub correct_answers: i32,
    pub wrong_answers: i32,
    pub session_start_time: DateTime<Utc>,
    pub session_end_time: Option<DateTime<Utc>>,
}

/// History paging parameters; out-of-range values are clamped, not rejected
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

// ============================================================================
// Leaderboard Requests
// ============================================================================

/// Leaderboard query parameters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub game_type: Option<GameType>,
    pub period: Option<LeaderboardPeriod>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// When present, the response carries this user's entry computed fresh
    pub current_user_id: Option<Snowflake>,
}
