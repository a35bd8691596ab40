//! PostgreSQL implementation of RefreshTokenRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use geoquiz_core::entities::RefreshToken;
use geoquiz_core::traits::{RefreshTokenRepository, RepoResult};
use geoquiz_core::value_objects::Snowflake;

use crate::mappers::RefreshTokenInsert;
use crate::models::RefreshTokenModel;

use super::error::{classify_db_error, map_db_error};

/// PostgreSQL implementation of RefreshTokenRepository
#[derive(Clone)]
pub struct PgRefreshTokenRepository {
    pool: PgPool,
}

impl PgRefreshTokenRepository {
    /// Create a new PgRefreshTokenRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    #[instrument(skip(self, token))]
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshToken>> {
        let result = sqlx::query_as::<_, RefreshTokenModel>(
            r"
            SELECT id, token, user_id, expires_at, created_at, is_revoked
            FROM refresh_tokens
            WHERE token = $1
            ",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(RefreshToken::from))
    }

    #[instrument(skip(self, token))]
    async fn create(&self, token: &RefreshToken) -> RepoResult<()> {
        let insert = RefreshTokenInsert::new(token);

        sqlx::query(
            r"
            INSERT INTO refresh_tokens (id, token, user_id, expires_at, created_at, is_revoked)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(insert.id)
        .bind(insert.token)
        .bind(insert.user_id)
        .bind(token.expires_at)
        .bind(token.created_at)
        .bind(token.is_revoked)
        .execute(&self.pool)
        .await
        .map_err(classify_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, token, replacement))]
    async fn rotate(&self, token: &str, replacement: &RefreshToken) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // The conditional UPDATE is the claim: concurrent rotations of the
        // same token race on this row and only one sees rows_affected == 1.
        let claimed = sqlx::query(
            r"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE token = $1 AND is_revoked = FALSE AND expires_at > now()
            ",
        )
        .bind(token)
        .execute(&mut *tx)
        .await
        .map_err(classify_db_error)?;

        if claimed.rows_affected() == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(false);
        }

        let insert = RefreshTokenInsert::new(replacement);

        sqlx::query(
            r"
            INSERT INTO refresh_tokens (id, token, user_id, expires_at, created_at, is_revoked)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(insert.id)
        .bind(insert.token)
        .bind(insert.user_id)
        .bind(replacement.expires_at)
        .bind(replacement.created_at)
        .bind(replacement.is_revoked)
        .execute(&mut *tx)
        .await
        .map_err(classify_db_error)?;

        tx.commit().await.map_err(classify_db_error)?;

        Ok(true)
    }

    #[instrument(skip(self, token))]
    async fn revoke(&self, token: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE token = $1 AND is_revoked = FALSE
            ",
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn revoke_all_for_user(&self, user_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE refresh_tokens
            SET is_revoked = TRUE
            WHERE user_id = $1 AND is_revoked = FALSE
            ",
        )
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn count_active_for_user(&self, user_id: Snowflake) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM refresh_tokens
            WHERE user_id = $1 AND is_revoked = FALSE AND expires_at > now()
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count.max(0) as u64)
    }
}
