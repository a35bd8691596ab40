//! Configuration loading

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, CacheConfig, ConfigError, DatabaseConfig, Environment, JwtConfig,
    RetryConfig, SnowflakeConfig,
};
