//! Snowflake ID - 64-bit unique identifier
//!
//! Layout: 42 bits of milliseconds since the custom epoch, 10 bits of
//! worker ID, 12 bits of per-millisecond sequence.

use parking_lot::Mutex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// 64-bit unique identifier for users, tokens, and sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Custom epoch: 2025-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_735_689_600_000;

    const TIMESTAMP_SHIFT: u32 = 22;
    const WORKER_SHIFT: u32 = 12;
    const SEQUENCE_MASK: u16 = 0x0FFF;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Check if the Snowflake is zero (uninitialized)
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Extract timestamp (milliseconds since Unix epoch)
    #[inline]
    pub const fn timestamp(&self) -> i64 {
        (self.0 >> Self::TIMESTAMP_SHIFT) + Self::EPOCH
    }

    const fn from_parts(unix_millis: i64, worker_id: u16, sequence: u16) -> Self {
        Self(
            ((unix_millis - Self::EPOCH) << Self::TIMESTAMP_SHIFT)
                | ((worker_id as i64) << Self::WORKER_SHIFT)
                | (sequence & Self::SEQUENCE_MASK) as i64,
        )
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Serialize as string for JSON (JavaScript BigInt safety)
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Snowflake::parse(&s).map_err(serde::de::Error::custom)
    }
}

struct GeneratorState {
    last_millis: i64,
    sequence: u16,
}

/// Thread-safe Snowflake ID generator
///
/// Produces up to 4096 IDs per millisecond per worker. The critical section
/// is a single short lock over the last-issued timestamp and sequence.
pub struct SnowflakeGenerator {
    worker_id: u16,
    state: Mutex<GeneratorState>,
}

impl SnowflakeGenerator {
    /// Create a new generator with the given worker ID
    ///
    /// # Panics
    /// Panics if `worker_id` does not fit in 10 bits.
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id < 1024, "worker_id must fit in 10 bits");
        Self {
            worker_id,
            state: Mutex::new(GeneratorState {
                last_millis: 0,
                sequence: 0,
            }),
        }
    }

    /// Generate a new unique Snowflake ID
    pub fn generate(&self) -> Snowflake {
        let mut state = self.state.lock();

        // Tolerate small wall-clock regressions by reusing the last
        // issued millisecond instead of sleeping.
        let mut now = Self::current_millis().max(state.last_millis);

        if now == state.last_millis {
            state.sequence = (state.sequence + 1) & Snowflake::SEQUENCE_MASK;
            if state.sequence == 0 {
                // Sequence exhausted for this millisecond
                while now <= state.last_millis {
                    std::hint::spin_loop();
                    now = Self::current_millis();
                }
            }
        } else {
            state.sequence = 0;
        }

        state.last_millis = now;
        Snowflake::from_parts(now, self.worker_id, state.sequence)
    }

    #[inline]
    fn current_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0)
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_roundtrip_and_display() {
        let sf = Snowflake::new(987_654_321);
        assert_eq!(sf.into_inner(), 987_654_321);
        assert_eq!(sf.to_string(), "987654321");
        assert_eq!(Snowflake::parse("987654321").unwrap(), sf);
        assert!(Snowflake::parse("not-a-number").is_err());
    }

    #[test]
    fn test_serialize_as_string() {
        let sf = Snowflake::new(123_456_789_012_345_678);
        let json = serde_json::to_string(&sf).unwrap();
        assert_eq!(json, "\"123456789012345678\"");
        let back: Snowflake = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sf);
    }

    #[test]
    fn test_timestamp_extraction() {
        let millis = Snowflake::EPOCH + 5_000;
        let sf = Snowflake::from_parts(millis, 3, 7);
        assert_eq!(sf.timestamp(), millis);
    }

    #[test]
    fn test_generator_unique_and_increasing() {
        let generator = SnowflakeGenerator::new(1);
        let mut last = Snowflake::new(0);
        for _ in 0..1000 {
            let id = generator.generate();
            assert!(id > last, "ids must be strictly increasing");
            last = id;
        }
    }

    #[test]
    fn test_generator_thread_safety() {
        let generator = Arc::new(SnowflakeGenerator::new(1));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = Arc::clone(&generator);
                thread::spawn(move || (0..1000).map(|_| generator.generate()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            seen.extend(handle.join().unwrap());
        }
        assert_eq!(seen.len(), 4000, "ids must be unique across threads");
    }

    #[test]
    #[should_panic(expected = "worker_id must fit in 10 bits")]
    fn test_generator_invalid_worker_id() {
        SnowflakeGenerator::new(1024);
    }
}
