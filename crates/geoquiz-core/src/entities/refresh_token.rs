//! Refresh token entity
//!
//! Single-use rotation credential. The only state transition is
//! Active -> Revoked; tokens are never reactivated.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Opaque refresh token owned by one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub id: Snowflake,
    /// Opaque unique value handed to the client
    pub token: String,
    pub user_id: Snowflake,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub is_revoked: bool,
}

impl RefreshToken {
    pub fn new(id: Snowflake, token: String, user_id: Snowflake, expires_at: DateTime<Utc>) -> Self {
        Self {
            id,
            token,
            user_id,
            expires_at,
            created_at: Utc::now(),
            is_revoked: false,
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Not revoked and not expired
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.is_revoked && !self.is_expired()
    }
}
