//! Response DTOs for the service boundary
//!
//! All response DTOs implement `Serialize`. Snowflake IDs serialize as
//! strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

use geoquiz_core::entities::LeaderboardEntry;
use geoquiz_core::value_objects::{GameType, Snowflake};

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with a token pair and the user
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access-token lifetime in seconds
    pub expires_in: i64,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: UserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

/// User profile as exposed to callers
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Snowflake,
    pub email: String,
    pub name: Option<String>,
    pub display_name: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Progress Responses
// ============================================================================

/// One persisted game session
#[derive(Debug, Clone, Serialize)]
pub struct GameSessionResponse {
    pub id: Snowflake,
    pub game_type: GameType,
    pub correct_answers: i32,
    pub wrong_answers: i32,
    pub session_start_time: DateTime<Utc>,
    pub session_end_time: Option<DateTime<Utc>>,
    pub duration_ms: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Aggregated statistics for one user (optionally scoped to one game type)
#[derive(Debug, Clone, Serialize)]
pub struct UserStatsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_type: Option<GameType>,
    pub games_played: u32,
    pub total_correct: i64,
    pub total_wrong: i64,
    /// Percentage, rounded to 2 decimals; 0 when no answers were given
    pub accuracy: f64,
    pub best_streak: u32,
    pub last_played_at: Option<DateTime<Utc>>,
}

/// One page of session history, newest first
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub sessions: Vec<GameSessionResponse>,
    pub page: u32,
    pub page_size: u32,
}

// ============================================================================
// Leaderboard Responses
// ============================================================================

/// Leaderboard page plus the requesting user's own entry when asked for
#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
    pub total_players: u32,
    pub page: u32,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user_entry: Option<LeaderboardEntry>,
}
