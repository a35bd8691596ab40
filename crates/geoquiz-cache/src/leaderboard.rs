//! TTL cache for computed leaderboard pages

use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::debug;

use geoquiz_core::entities::LeaderboardPage;
use geoquiz_core::value_objects::{GameType, LeaderboardPeriod};

/// Default absolute time-to-live for a cached page
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default sliding idle timeout; an untouched entry expires early
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(120);

/// Cache key: one computed page per filter combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeaderboardCacheKey {
    pub game_type: Option<GameType>,
    pub period: Option<LeaderboardPeriod>,
    pub page: u32,
    pub page_size: u32,
}

struct CacheEntry {
    page: LeaderboardPage,
    created_at: Instant,
    last_access: Mutex<Instant>,
}

impl CacheEntry {
    fn new(page: LeaderboardPage) -> Self {
        let now = Instant::now();
        Self {
            page,
            created_at: now,
            last_access: Mutex::new(now),
        }
    }

    fn is_expired(&self, now: Instant, ttl: Duration, idle: Duration) -> bool {
        now.duration_since(self.created_at) >= ttl
            || now.duration_since(*self.last_access.lock()) >= idle
    }
}

/// In-process leaderboard page cache
///
/// Staleness is bounded by the absolute TTL; writers never invalidate. This
/// trades up to one TTL window of staleness for reads that skip aggregation
/// entirely.
pub struct LeaderboardCache {
    entries: DashMap<LeaderboardCacheKey, CacheEntry>,
    ttl: Duration,
    idle_timeout: Duration,
}

impl LeaderboardCache {
    pub fn new(ttl: Duration, idle_timeout: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            idle_timeout,
        }
    }

    /// Fetch a cached page, refreshing its idle clock; expired entries are
    /// removed and reported as a miss
    pub fn get(&self, key: &LeaderboardCacheKey) -> Option<LeaderboardPage> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired(now, self.ttl, self.idle_timeout) {
                drop(entry);
                self.entries.remove(key);
                debug!(?key, "leaderboard cache entry expired");
                return None;
            }

            *entry.last_access.lock() = now;
            return Some(entry.page.clone());
        }

        None
    }

    /// Store a freshly computed page
    pub fn insert(&self, key: LeaderboardCacheKey, page: LeaderboardPage) {
        self.entries.insert(key, CacheEntry::new(page));
    }

    /// Advisory invalidation hint. Entries are left to age out through their
    /// TTLs; staleness is already bounded, and dropping the whole map here
    /// would stampede the aggregation path after every write burst.
    pub fn clear(&self) {
        debug!(entries = self.entries.len(), "leaderboard cache clear requested (advisory)");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LeaderboardCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_IDLE_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(page: u32) -> LeaderboardCacheKey {
        LeaderboardCacheKey {
            game_type: Some(GameType::Countries),
            period: Some(LeaderboardPeriod::Week),
            page,
            page_size: 50,
        }
    }

    fn page(total_players: u32) -> LeaderboardPage {
        LeaderboardPage {
            entries: Vec::new(),
            total_players,
            page: 1,
            page_size: 50,
        }
    }

    #[test]
    fn test_hit_within_ttl() {
        let cache = LeaderboardCache::default();
        cache.insert(key(1), page(10));

        let hit = cache.get(&key(1)).unwrap();
        assert_eq!(hit.total_players, 10);
        assert!(cache.get(&key(2)).is_none());
    }

    #[test]
    fn test_absolute_ttl_expires_entry() {
        let cache = LeaderboardCache::new(Duration::from_millis(0), Duration::from_secs(60));
        cache.insert(key(1), page(10));

        assert!(cache.get(&key(1)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_idle_timeout_expires_entry() {
        let cache = LeaderboardCache::new(Duration::from_secs(60), Duration::from_millis(0));
        cache.insert(key(1), page(10));

        assert!(cache.get(&key(1)).is_none());
    }

    #[test]
    fn test_access_refreshes_idle_clock() {
        let cache = LeaderboardCache::new(Duration::from_secs(60), Duration::from_millis(50));
        cache.insert(key(1), page(10));

        // Touch before the idle timeout elapses; the entry must survive.
        std::thread::sleep(Duration::from_millis(20));
        assert!(cache.get(&key(1)).is_some());
        std::thread::sleep(Duration::from_millis(20));
        assert!(cache.get(&key(1)).is_some());
    }

    #[test]
    fn test_clear_is_advisory() {
        let cache = LeaderboardCache::default();
        cache.insert(key(1), page(10));

        cache.clear();
        assert!(cache.get(&key(1)).is_some());
    }
}
