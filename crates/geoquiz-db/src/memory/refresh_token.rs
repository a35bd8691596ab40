//! In-memory implementation of RefreshTokenRepository

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use geoquiz_core::entities::RefreshToken;
use geoquiz_core::error::DomainError;
use geoquiz_core::traits::{RefreshTokenRepository, RepoResult};
use geoquiz_core::value_objects::Snowflake;

/// In-memory implementation of RefreshTokenRepository
#[derive(Default)]
pub struct MemoryRefreshTokenRepository {
    rows: Mutex<Vec<RefreshToken>>,
}

impl MemoryRefreshTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshTokenRepository for MemoryRefreshTokenRepository {
    async fn find_by_token(&self, token: &str) -> RepoResult<Option<RefreshToken>> {
        let rows = self.rows.lock();
        Ok(rows.iter().find(|t| t.token == token).cloned())
    }

    async fn create(&self, token: &RefreshToken) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        if rows.iter().any(|t| t.token == token.token) {
            return Err(DomainError::UniqueViolation(format!(
                "duplicate key value violates unique constraint on refresh_tokens.token: {}",
                token.token
            )));
        }
        rows.push(token.clone());
        Ok(())
    }

    async fn rotate(&self, token: &str, replacement: &RefreshToken) -> RepoResult<bool> {
        let now = Utc::now();
        let mut rows = self.rows.lock();

        // Compare-and-swap under one lock: the claim and the replacement
        // insert commit together, matching the SQL transaction.
        let claimed = match rows
            .iter_mut()
            .find(|t| t.token == token && !t.is_revoked && t.expires_at > now)
        {
            Some(row) => {
                row.is_revoked = true;
                true
            }
            None => false,
        };

        if !claimed {
            return Ok(false);
        }

        rows.push(replacement.clone());
        Ok(true)
    }

    async fn revoke(&self, token: &str) -> RepoResult<bool> {
        let mut rows = self.rows.lock();
        match rows.iter_mut().find(|t| t.token == token && !t.is_revoked) {
            Some(row) => {
                row.is_revoked = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: Snowflake) -> RepoResult<u64> {
        let mut rows = self.rows.lock();
        let mut revoked = 0u64;
        for row in rows.iter_mut().filter(|t| t.user_id == user_id && !t.is_revoked) {
            row.is_revoked = true;
            revoked += 1;
        }
        Ok(revoked)
    }

    async fn count_active_for_user(&self, user_id: Snowflake) -> RepoResult<u64> {
        let now = Utc::now();
        let rows = self.rows.lock();
        Ok(rows
            .iter()
            .filter(|t| t.user_id == user_id && !t.is_revoked && t.expires_at > now)
            .count() as u64)
    }
}
