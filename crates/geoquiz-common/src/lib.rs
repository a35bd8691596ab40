//! # geoquiz-common
//!
//! Shared utilities: configuration, error handling, authentication
//! primitives, telemetry, and the concurrency helpers (retry coordination
//! and the process-wide registration gate).

pub mod auth;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    generate_refresh_value, hash_password, validate_email, validate_password_strength,
    verify_password, Claims, JwtService, PasswordService,
};
pub use concurrency::{Gate, RetryCoordinator};
pub use config::{
    AppConfig, AppSettings, CacheConfig, ConfigError, DatabaseConfig, Environment, JwtConfig,
    RetryConfig, SnowflakeConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{init_tracing, try_init_tracing, LogFormat, TracingConfig, TracingError};
