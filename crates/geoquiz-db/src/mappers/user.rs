//! User entity <-> model mapper

use geoquiz_core::entities::User;
use geoquiz_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            email: model.email,
            name: model.name,
            avatar: model.avatar,
            provider: model.provider,
            created_at: model.created_at,
            last_login_at: model.last_login_at,
        }
    }
}

/// User entity reference prepared for database insertion
pub struct UserInsert<'a> {
    pub id: i64,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: Option<&'a str>,
    pub avatar: Option<&'a str>,
    pub provider: &'a str,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a User, password_hash: &'a str) -> Self {
        Self {
            id: user.id.into_inner(),
            email: &user.email,
            password_hash,
            name: user.name.as_deref(),
            avatar: user.avatar.as_deref(),
            provider: &user.provider,
        }
    }
}
