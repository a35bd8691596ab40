//! Refresh token entity <-> model mapper

use geoquiz_core::entities::RefreshToken;
use geoquiz_core::value_objects::Snowflake;

use crate::models::RefreshTokenModel;

impl From<RefreshTokenModel> for RefreshToken {
    fn from(model: RefreshTokenModel) -> Self {
        RefreshToken {
            id: Snowflake::new(model.id),
            token: model.token,
            user_id: Snowflake::new(model.user_id),
            expires_at: model.expires_at,
            created_at: model.created_at,
            is_revoked: model.is_revoked,
        }
    }
}

/// Refresh token entity reference prepared for database insertion
pub struct RefreshTokenInsert<'a> {
    pub id: i64,
    pub token: &'a str,
    pub user_id: i64,
}

impl<'a> RefreshTokenInsert<'a> {
    pub fn new(token: &'a RefreshToken) -> Self {
        Self {
            id: token.id.into_inner(),
            token: &token.token,
            user_id: token.user_id.into_inner(),
        }
    }
}
