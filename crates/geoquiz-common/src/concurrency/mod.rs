//! Concurrency utilities - retry coordination and named mutual-exclusion gates

mod gate;
mod retry;

pub use gate::Gate;
pub use retry::RetryCoordinator;
