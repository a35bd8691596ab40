//! In-memory implementations of the repository traits
//!
//! These back the concurrency-heavy test suites (registration races,
//! refresh rotation, monotonic write ordering) without requiring a
//! running PostgreSQL instance. Each store keeps its rows behind a
//! single `parking_lot::Mutex` so compound operations (claim + insert)
//! are atomic the same way the SQL transactions are.

mod game_session;
mod refresh_token;
mod user;

pub use game_session::MemoryGameSessionRepository;
pub use refresh_token::MemoryRefreshTokenRepository;
pub use user::MemoryUserRepository;
