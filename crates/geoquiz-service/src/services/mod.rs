//! Business logic services
//!
//! All services borrow a `ServiceContext` and orchestrate domain operations
//! through the repository traits, the retry coordinator, and the monotonic
//! clock.

pub mod auth;
pub mod context;
pub mod error;
pub mod leaderboard;
pub mod progress;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use leaderboard::LeaderboardService;
pub use progress::ProgressService;
