//! Value objects - immutable domain primitives

mod clock;
mod game_type;
mod snowflake;

pub use clock::MonotonicClock;
pub use game_type::{GameType, GameTypeParseError, LeaderboardPeriod};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
