//! PostgreSQL implementations of the repository traits from geoquiz-core

mod error;
mod game_session;
mod refresh_token;
mod user;

pub use error::{classify_db_error, map_db_error};
pub use game_session::PgGameSessionRepository;
pub use refresh_token::PgRefreshTokenRepository;
pub use user::PgUserRepository;
