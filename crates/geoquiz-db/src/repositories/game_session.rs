//! PostgreSQL implementation of GameSessionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use geoquiz_core::entities::GameSession;
use geoquiz_core::traits::{GameSessionRepository, LeaderboardFilter, RepoResult};
use geoquiz_core::value_objects::{GameType, Snowflake};

use crate::mappers::GameSessionInsert;
use crate::models::GameSessionModel;

use super::error::{classify_db_error, map_db_error};

const SELECT_COLUMNS: &str = "id, user_id, game_type, correct_answers, wrong_answers, \
     session_start_time, session_end_time, duration_ms, created_at";

/// PostgreSQL implementation of GameSessionRepository
#[derive(Clone)]
pub struct PgGameSessionRepository {
    pool: PgPool,
}

impl PgGameSessionRepository {
    /// Create a new PgGameSessionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_rows(rows: Vec<GameSessionModel>) -> RepoResult<Vec<GameSession>> {
        rows.into_iter().map(GameSession::try_from).collect()
    }
}

#[async_trait]
impl GameSessionRepository for PgGameSessionRepository {
    #[instrument(skip(self, session))]
    async fn create(&self, session: &GameSession) -> RepoResult<()> {
        let insert = GameSessionInsert::new(session);

        sqlx::query(
            r"
            INSERT INTO game_sessions
                (id, user_id, game_type, correct_answers, wrong_answers,
                 session_start_time, session_end_time, duration_ms, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(insert.id)
        .bind(insert.user_id)
        .bind(insert.game_type)
        .bind(session.correct_answers)
        .bind(session.wrong_answers)
        .bind(session.session_start_time)
        .bind(session.session_end_time)
        .bind(session.duration_ms)
        .bind(session.created_at)
        .execute(&self.pool)
        .await
        .map_err(classify_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, sessions), fields(count = sessions.len()))]
    async fn create_batch(&self, sessions: &[GameSession]) -> RepoResult<u64> {
        if sessions.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let mut inserted = 0u64;

        for session in sessions {
            let insert = GameSessionInsert::new(session);

            let result = sqlx::query(
                r"
                INSERT INTO game_sessions
                    (id, user_id, game_type, correct_answers, wrong_answers,
                     session_start_time, session_end_time, duration_ms, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ",
            )
            .bind(insert.id)
            .bind(insert.user_id)
            .bind(insert.game_type)
            .bind(session.correct_answers)
            .bind(session.wrong_answers)
            .bind(session.session_start_time)
            .bind(session.session_end_time)
            .bind(session.duration_ms)
            .bind(session.created_at)
            .execute(&mut *tx)
            .await
            .map_err(classify_db_error)?;

            inserted += result.rows_affected();
        }

        tx.commit().await.map_err(classify_db_error)?;

        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<GameSession>> {
        let rows = sqlx::query_as::<_, GameSessionModel>(&format!(
            r"
            SELECT {SELECT_COLUMNS}
            FROM game_sessions
            WHERE user_id = $1
            ORDER BY created_at ASC, session_start_time ASC
            "
        ))
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::map_rows(rows)
    }

    #[instrument(skip(self))]
    async fn find_by_user_and_type(
        &self,
        user_id: Snowflake,
        game_type: GameType,
    ) -> RepoResult<Vec<GameSession>> {
        let rows = sqlx::query_as::<_, GameSessionModel>(&format!(
            r"
            SELECT {SELECT_COLUMNS}
            FROM game_sessions
            WHERE user_id = $1 AND game_type = $2
            ORDER BY created_at ASC, session_start_time ASC
            "
        ))
        .bind(user_id.into_inner())
        .bind(game_type.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::map_rows(rows)
    }

    #[instrument(skip(self))]
    async fn find_page(
        &self,
        user_id: Snowflake,
        limit: u32,
        offset: u64,
    ) -> RepoResult<Vec<GameSession>> {
        let rows = sqlx::query_as::<_, GameSessionModel>(&format!(
            r"
            SELECT {SELECT_COLUMNS}
            FROM game_sessions
            WHERE user_id = $1
            ORDER BY created_at DESC, session_start_time DESC
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(user_id.into_inner())
        .bind(i64::from(limit))
        .bind(offset.min(i64::MAX as u64) as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::map_rows(rows)
    }

    #[instrument(skip(self))]
    async fn find_for_leaderboard(
        &self,
        filter: LeaderboardFilter,
    ) -> RepoResult<Vec<GameSession>> {
        // Optional filters are pushed down so all-time/all-types reads do not
        // scan through application-side filtering.
        let rows = sqlx::query_as::<_, GameSessionModel>(&format!(
            r"
            SELECT {SELECT_COLUMNS}
            FROM game_sessions
            WHERE ($1::text IS NULL OR game_type = $1)
              AND ($2::timestamptz IS NULL OR session_start_time >= $2)
            ORDER BY created_at ASC
            "
        ))
        .bind(filter.game_type.map(|g| g.as_str()))
        .bind(filter.played_since)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::map_rows(rows)
    }
}
