//! In-memory implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use geoquiz_core::entities::User;
use geoquiz_core::error::DomainError;
use geoquiz_core::traits::{RepoResult, UserRepository};
use geoquiz_core::value_objects::Snowflake;

struct UserRow {
    user: User,
    password_hash: String,
}

/// In-memory implementation of UserRepository
#[derive(Default)]
pub struct MemoryUserRepository {
    rows: Mutex<Vec<UserRow>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let rows = self.rows.lock();
        Ok(rows.iter().find(|r| r.user.id == id).map(|r| r.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let needle = email.to_lowercase();
        let rows = self.rows.lock();
        Ok(rows
            .iter()
            .find(|r| r.user.email.to_lowercase() == needle)
            .map(|r| r.user.clone()))
    }

    async fn find_many(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>> {
        let rows = self.rows.lock();
        Ok(rows
            .iter()
            .filter(|r| ids.contains(&r.user.id))
            .map(|r| r.user.clone())
            .collect())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let needle = email.to_lowercase();
        let rows = self.rows.lock();
        Ok(rows.iter().any(|r| r.user.email.to_lowercase() == needle))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let needle = user.email.to_lowercase();
        let mut rows = self.rows.lock();

        // The duplicate check and the insert happen under one lock, which
        // is what the unique index gives the SQL implementation.
        if rows.iter().any(|r| r.user.email.to_lowercase() == needle) {
            return Err(DomainError::UniqueViolation(format!(
                "duplicate key value violates unique constraint on users.email: {}",
                user.email
            )));
        }

        rows.push(UserRow {
            user: user.clone(),
            password_hash: password_hash.to_string(),
        });

        Ok(())
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        let rows = self.rows.lock();
        Ok(rows
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.password_hash.clone()))
    }

    async fn update_password(&self, id: Snowflake, password_hash: &str) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        match rows.iter_mut().find(|r| r.user.id == id) {
            Some(row) => {
                row.password_hash = password_hash.to_string();
                Ok(())
            }
            None => Err(DomainError::UserNotFound(id)),
        }
    }

    async fn update_last_login(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        let mut rows = self.rows.lock();
        match rows.iter_mut().find(|r| r.user.id == id) {
            Some(row) => {
                row.user.last_login_at = Some(at);
                Ok(())
            }
            None => Err(DomainError::UserNotFound(id)),
        }
    }
}
