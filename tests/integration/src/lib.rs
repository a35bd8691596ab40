//! Integration test utilities
//!
//! Helpers for running cross-crate tests against the in-memory
//! repositories: a fully wired `ServiceContext` plus request fixtures.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
