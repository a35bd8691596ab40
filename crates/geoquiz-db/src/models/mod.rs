//! Database models - SQLx-compatible structs for PostgreSQL tables

mod game_session;
mod refresh_token;
mod user;

pub use game_session::GameSessionModel;
pub use refresh_token::RefreshTokenModel;
pub use user::UserModel;
