//! # geoquiz-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! The three services map onto the concurrency-sensitive core of the quiz
//! backend: `AuthService` owns identity and the refresh-token rotation state
//! machine, `ProgressService` records game sessions with strictly ordered
//! timestamps, and `LeaderboardService` aggregates sessions into cached
//! rankings.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, LeaderboardService, ProgressService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult,
};
