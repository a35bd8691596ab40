//! Entity to model mappers
//!
//! Conversions between domain entities (geoquiz-core) and database models.
//! - `From<Model> for Entity` / `TryFrom`: convert rows to domain objects
//! - `*Insert` structs: prepare entity data for insertion

mod game_session;
mod refresh_token;
mod user;

pub use game_session::GameSessionInsert;
pub use refresh_token::RefreshTokenInsert;
pub use user::UserInsert;
