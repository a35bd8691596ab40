//! Test context wiring

use std::sync::Arc;
use std::time::Duration;

use geoquiz_cache::LeaderboardCache;
use geoquiz_common::auth::JwtService;
use geoquiz_common::RetryCoordinator;
use geoquiz_db::{
    MemoryGameSessionRepository, MemoryRefreshTokenRepository, MemoryUserRepository,
};
use geoquiz_service::ServiceContext;

/// Build a `ServiceContext` over the in-memory repositories
///
/// Retry delays are shortened so conflict-heavy tests stay fast.
pub fn test_context() -> ServiceContext {
    ServiceContext::builder()
        .user_repository(Arc::new(MemoryUserRepository::new()))
        .refresh_token_repository(Arc::new(MemoryRefreshTokenRepository::new()))
        .game_session_repository(Arc::new(MemoryGameSessionRepository::new()))
        .jwt_service(Arc::new(JwtService::new(
            "integration-test-secret-key-0123456789",
            900,
            604_800,
        )))
        .retry_coordinator(RetryCoordinator::new(3, Duration::from_millis(1)))
        .leaderboard_cache(Arc::new(LeaderboardCache::default()))
        .build()
        .expect("test context must build")
}

/// Same as [`test_context`] but with a leaderboard cache that expires
/// almost immediately, for tests that need fresh aggregation every call
pub fn test_context_without_caching() -> ServiceContext {
    ServiceContext::builder()
        .user_repository(Arc::new(MemoryUserRepository::new()))
        .refresh_token_repository(Arc::new(MemoryRefreshTokenRepository::new()))
        .game_session_repository(Arc::new(MemoryGameSessionRepository::new()))
        .jwt_service(Arc::new(JwtService::new(
            "integration-test-secret-key-0123456789",
            900,
            604_800,
        )))
        .retry_coordinator(RetryCoordinator::new(3, Duration::from_millis(1)))
        .leaderboard_cache(Arc::new(LeaderboardCache::new(
            Duration::from_millis(0),
            Duration::from_millis(0),
        )))
        .build()
        .expect("test context must build")
}
