//! Service context - dependency container for services
//!
//! Holds the repositories, concurrency utilities, and auth capabilities the
//! services need. Repositories are injected as trait objects so the same
//! context wires up against PostgreSQL in production and the in-memory
//! stores in tests.

use std::sync::Arc;
use std::time::Duration;

use geoquiz_cache::LeaderboardCache;
use geoquiz_common::auth::JwtService;
use geoquiz_common::{AppConfig, Gate, RetryCoordinator};
use geoquiz_core::traits::{GameSessionRepository, RefreshTokenRepository, UserRepository};
use geoquiz_core::value_objects::{MonotonicClock, Snowflake, SnowflakeGenerator};
use geoquiz_db::{PgGameSessionRepository, PgPool, PgRefreshTokenRepository, PgUserRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// The registration gate and the monotonic clock are process-local; their
/// guarantees do not extend across multiple server instances.
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    game_session_repo: Arc<dyn GameSessionRepository>,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    clock: Arc<MonotonicClock>,
    retry: RetryCoordinator,
    registration_gate: Arc<Gate>,
    leaderboard_cache: Arc<LeaderboardCache>,
}

impl ServiceContext {
    /// Start building a context
    #[must_use]
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::default()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn refresh_token_repo(&self) -> &dyn RefreshTokenRepository {
        self.refresh_token_repo.as_ref()
    }

    pub fn game_session_repo(&self) -> &dyn GameSessionRepository {
        self.game_session_repo.as_ref()
    }

    // === Capabilities ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn clock(&self) -> &MonotonicClock {
        self.clock.as_ref()
    }

    pub fn retry(&self) -> &RetryCoordinator {
        &self.retry
    }

    pub fn registration_gate(&self) -> &Gate {
        self.registration_gate.as_ref()
    }

    pub fn leaderboard_cache(&self) -> &LeaderboardCache {
        self.leaderboard_cache.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("retry", &self.retry)
            .field("registration_gate", &self.registration_gate.name())
            .finish_non_exhaustive()
    }
}

/// Builder for `ServiceContext`
///
/// Repositories and the JWT service are required; everything else has
/// sensible defaults.
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    refresh_token_repo: Option<Arc<dyn RefreshTokenRepository>>,
    game_session_repo: Option<Arc<dyn GameSessionRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    clock: Option<Arc<MonotonicClock>>,
    retry: Option<RetryCoordinator>,
    registration_gate: Option<Arc<Gate>>,
    leaderboard_cache: Option<Arc<LeaderboardCache>>,
}

impl ServiceContextBuilder {
    #[must_use]
    pub fn user_repository(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn refresh_token_repository(mut self, repo: Arc<dyn RefreshTokenRepository>) -> Self {
        self.refresh_token_repo = Some(repo);
        self
    }

    #[must_use]
    pub fn game_session_repository(mut self, repo: Arc<dyn GameSessionRepository>) -> Self {
        self.game_session_repo = Some(repo);
        self
    }

    /// Wire all three repositories against one PostgreSQL pool
    #[must_use]
    pub fn postgres(self, pool: &PgPool) -> Self {
        self.user_repository(Arc::new(PgUserRepository::new(pool.clone())))
            .refresh_token_repository(Arc::new(PgRefreshTokenRepository::new(pool.clone())))
            .game_session_repository(Arc::new(PgGameSessionRepository::new(pool.clone())))
    }

    #[must_use]
    pub fn jwt_service(mut self, jwt: Arc<JwtService>) -> Self {
        self.jwt_service = Some(jwt);
        self
    }

    #[must_use]
    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Substitute the timestamp source. The default is process-local; a
    /// shared clock authority goes in here for multi-instance deployments.
    #[must_use]
    pub fn clock(mut self, clock: Arc<MonotonicClock>) -> Self {
        self.clock = Some(clock);
        self
    }

    #[must_use]
    pub fn retry_coordinator(mut self, retry: RetryCoordinator) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Substitute the registration gate, e.g. one backed by a distributed
    /// lock when several instances accept registrations.
    #[must_use]
    pub fn registration_gate(mut self, gate: Arc<Gate>) -> Self {
        self.registration_gate = Some(gate);
        self
    }

    #[must_use]
    pub fn leaderboard_cache(mut self, cache: Arc<LeaderboardCache>) -> Self {
        self.leaderboard_cache = Some(cache);
        self
    }

    /// Fill JWT, retry, cache, and snowflake settings from configuration
    #[must_use]
    pub fn with_config(self, config: &AppConfig) -> Self {
        self.jwt_service(Arc::new(JwtService::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry,
            config.jwt.refresh_token_expiry,
        )))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)))
        .retry_coordinator(RetryCoordinator::new(
            config.retry.max_attempts,
            Duration::from_millis(config.retry.base_delay_ms),
        ))
        .leaderboard_cache(Arc::new(LeaderboardCache::new(
            Duration::from_secs(config.cache.leaderboard_ttl_secs),
            Duration::from_secs(config.cache.leaderboard_idle_secs),
        )))
    }

    /// Build the context
    ///
    /// # Errors
    /// Returns an internal error when a required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let user_repo = self
            .user_repo
            .ok_or_else(|| ServiceError::internal("user repository not configured"))?;
        let refresh_token_repo = self
            .refresh_token_repo
            .ok_or_else(|| ServiceError::internal("refresh token repository not configured"))?;
        let game_session_repo = self
            .game_session_repo
            .ok_or_else(|| ServiceError::internal("game session repository not configured"))?;
        let jwt_service = self
            .jwt_service
            .ok_or_else(|| ServiceError::internal("jwt service not configured"))?;

        Ok(ServiceContext {
            user_repo,
            refresh_token_repo,
            game_session_repo,
            jwt_service,
            snowflake_generator: self
                .snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::new(0))),
            clock: self.clock.unwrap_or_else(|| Arc::new(MonotonicClock::new())),
            retry: self.retry.unwrap_or_default(),
            registration_gate: self
                .registration_gate
                .unwrap_or_else(|| Arc::new(Gate::new("registration"))),
            leaderboard_cache: self
                .leaderboard_cache
                .unwrap_or_else(|| Arc::new(LeaderboardCache::default())),
        })
    }
}
