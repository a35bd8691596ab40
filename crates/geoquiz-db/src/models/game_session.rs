//! Game session database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the game_sessions table
#[derive(Debug, Clone, FromRow)]
pub struct GameSessionModel {
    pub id: i64,
    pub user_id: i64,
    pub game_type: String,
    pub correct_answers: i32,
    pub wrong_answers: i32,
    pub session_start_time: DateTime<Utc>,
    pub session_end_time: Option<DateTime<Utc>>,
    pub duration_ms: Option<i64>,
    pub created_at: DateTime<Utc>,
}
