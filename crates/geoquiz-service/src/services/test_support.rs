//! Shared fixtures for service tests

use std::sync::Arc;
use std::time::Duration;

use geoquiz_common::auth::JwtService;
use geoquiz_common::RetryCoordinator;
use geoquiz_db::{
    MemoryGameSessionRepository, MemoryRefreshTokenRepository, MemoryUserRepository,
};

use super::context::ServiceContext;

/// Context wired against the in-memory repositories, with short retry
/// delays so tests stay fast
pub(crate) fn memory_context() -> ServiceContext {
    ServiceContext::builder()
        .user_repository(Arc::new(MemoryUserRepository::new()))
        .refresh_token_repository(Arc::new(MemoryRefreshTokenRepository::new()))
        .game_session_repository(Arc::new(MemoryGameSessionRepository::new()))
        .jwt_service(Arc::new(JwtService::new(
            "test-secret-key-that-is-long-enough",
            900,
            604_800,
        )))
        .retry_coordinator(RetryCoordinator::new(3, Duration::from_millis(1)))
        .build()
        .expect("memory context must build")
}
