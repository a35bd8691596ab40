//! # geoquiz-core
//!
//! Domain layer containing entities, value objects, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    accuracy, best_streak, composite_score, GameSession, LeaderboardEntry, LeaderboardPage,
    RefreshToken, User,
};
pub use error::DomainError;
pub use traits::{
    GameSessionRepository, LeaderboardFilter, RefreshTokenRepository, RepoResult, UserRepository,
};
pub use value_objects::{
    GameType, GameTypeParseError, LeaderboardPeriod, MonotonicClock, Snowflake,
    SnowflakeGenerator, SnowflakeParseError,
};
