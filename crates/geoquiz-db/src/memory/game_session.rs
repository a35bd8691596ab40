//! In-memory implementation of GameSessionRepository

use async_trait::async_trait;
use parking_lot::Mutex;

use geoquiz_core::entities::GameSession;
use geoquiz_core::traits::{GameSessionRepository, LeaderboardFilter, RepoResult};
use geoquiz_core::value_objects::{GameType, Snowflake};

/// In-memory implementation of GameSessionRepository
#[derive(Default)]
pub struct MemoryGameSessionRepository {
    rows: Mutex<Vec<GameSession>>,
}

impl MemoryGameSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_asc(mut sessions: Vec<GameSession>) -> Vec<GameSession> {
        sessions.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then(a.session_start_time.cmp(&b.session_start_time))
        });
        sessions
    }
}

#[async_trait]
impl GameSessionRepository for MemoryGameSessionRepository {
    async fn create(&self, session: &GameSession) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        rows.push(session.clone());
        Ok(())
    }

    async fn create_batch(&self, sessions: &[GameSession]) -> RepoResult<u64> {
        let mut rows = self.rows.lock();
        rows.extend_from_slice(sessions);
        Ok(sessions.len() as u64)
    }

    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<GameSession>> {
        let rows = self.rows.lock();
        let matched = rows.iter().filter(|s| s.user_id == user_id).cloned().collect();
        Ok(Self::sorted_asc(matched))
    }

    async fn find_by_user_and_type(
        &self,
        user_id: Snowflake,
        game_type: GameType,
    ) -> RepoResult<Vec<GameSession>> {
        let rows = self.rows.lock();
        let matched = rows
            .iter()
            .filter(|s| s.user_id == user_id && s.game_type == game_type)
            .cloned()
            .collect();
        Ok(Self::sorted_asc(matched))
    }

    async fn find_page(
        &self,
        user_id: Snowflake,
        limit: u32,
        offset: u64,
    ) -> RepoResult<Vec<GameSession>> {
        let rows = self.rows.lock();
        let mut matched: Vec<_> = rows.iter().filter(|s| s.user_id == user_id).cloned().collect();
        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.session_start_time.cmp(&a.session_start_time))
        });
        Ok(matched
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(limit as usize)
            .collect())
    }

    async fn find_for_leaderboard(
        &self,
        filter: LeaderboardFilter,
    ) -> RepoResult<Vec<GameSession>> {
        let rows = self.rows.lock();
        let matched = rows
            .iter()
            .filter(|s| {
                filter.game_type.is_none_or(|g| s.game_type == g)
                    && filter.played_since.is_none_or(|since| s.session_start_time >= since)
            })
            .cloned()
            .collect();
        Ok(Self::sorted_asc(matched))
    }
}
