//! # geoquiz-db
//!
//! Persistence layer implementing the repository traits from `geoquiz-core`.
//!
//! Two backends are provided:
//!
//! - PostgreSQL via SQLx (`repositories` module): connection pool, `FromRow`
//!   models, entity mappers, and structured error classification into
//!   retryable (`UniqueViolation`, `ConcurrencyConflict`) versus permanent
//!   `DomainError` variants.
//! - In-memory (`memory` module): `parking_lot`-guarded maps with the same
//!   transactional semantics, used by tests and local development. The
//!   refresh-token rotate and the batch insert are atomic under one lock,
//!   mirroring the PostgreSQL transaction behavior.

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemoryGameSessionRepository, MemoryRefreshTokenRepository, MemoryUserRepository};
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{PgGameSessionRepository, PgRefreshTokenRepository, PgUserRepository};
