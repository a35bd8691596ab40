//! Repository traits (ports)

mod repositories;

pub use repositories::{
    GameSessionRepository, LeaderboardFilter, RefreshTokenRepository, RepoResult, UserRepository,
};
