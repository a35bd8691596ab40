//! # geoquiz-cache
//!
//! In-process caching layer for computed leaderboard pages.
//!
//! Leaderboard aggregation reads every qualifying session, so pages are
//! cached per (game type, period, page, page size) with an absolute TTL
//! plus a sliding idle TTL. Entries expire passively on access; there is
//! no background sweeper.

mod leaderboard;

pub use leaderboard::{LeaderboardCache, LeaderboardCacheKey};
