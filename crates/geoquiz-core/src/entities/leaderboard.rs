//! Leaderboard types - derived, never persisted

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// One ranked row, recomputed from session aggregates on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position; ties receive sequential ranks because the sort
    /// order is fully deterministic
    pub rank: u32,
    pub user_id: Snowflake,
    pub display_name: String,
    pub total_score: i64,
    pub games_played: u32,
    pub accuracy: f64,
    pub best_streak: u32,
    pub last_played_at: DateTime<Utc>,
}

/// One page of the leaderboard; cacheable because it carries no
/// requester-specific data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardPage {
    pub entries: Vec<LeaderboardEntry>,
    pub total_players: u32,
    pub page: u32,
    pub page_size: u32,
}

/// Composite ranking score
///
/// `total_correct + floor(accuracy * 0.1) + best_streak * 5` - rewards raw
/// volume, consistency, and streak length without letting volume dominate.
pub fn composite_score(total_correct: i64, accuracy: f64, best_streak: u32) -> i64 {
    total_correct + (accuracy * 0.1).floor() as i64 + i64::from(best_streak) * 5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_score_formula() {
        // 50 correct, 90% accuracy, streak of 4: 50 + 9 + 20
        assert_eq!(composite_score(50, 90.0, 4), 79);
    }

    #[test]
    fn test_composite_score_floors_accuracy_bonus() {
        assert_eq!(composite_score(0, 99.99, 0), 9);
        assert_eq!(composite_score(0, 100.0, 0), 10);
    }

    #[test]
    fn test_composite_score_zero() {
        assert_eq!(composite_score(0, 0.0, 0), 0);
    }
}
