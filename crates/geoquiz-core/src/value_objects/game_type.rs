//! Game type and leaderboard period enumerations

use chrono::{DateTime, Days, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of quiz modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Countries,
    Flags,
    States,
}

impl GameType {
    /// All valid game types
    pub const ALL: [GameType; 3] = [Self::Countries, Self::Flags, Self::States];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Countries => "countries",
            Self::Flags => "flags",
            Self::States => "states",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GameType {
    type Err = GameTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "countries" => Ok(Self::Countries),
            "flags" => Ok(Self::Flags),
            "states" => Ok(Self::States),
            other => Err(GameTypeParseError(other.to_string())),
        }
    }
}

/// Error when parsing a game type from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown game type: {0}")]
pub struct GameTypeParseError(pub String);

/// Time window for leaderboard aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeaderboardPeriod {
    #[default]
    AllTime,
    Week,
    Month,
    Year,
}

impl LeaderboardPeriod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AllTime => "all-time",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Lower cutoff for `session_start_time`, or `None` for all-time
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::AllTime => None,
            Self::Week => now.checked_sub_days(Days::new(7)),
            Self::Month => now.checked_sub_months(Months::new(1)),
            Self::Year => now.checked_sub_months(Months::new(12)),
        }
    }
}

impl fmt::Display for LeaderboardPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LeaderboardPeriod {
    type Err = GameTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all-time" => Ok(Self::AllTime),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(GameTypeParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_game_type_parse() {
        assert_eq!("countries".parse::<GameType>().unwrap(), GameType::Countries);
        assert_eq!("flags".parse::<GameType>().unwrap(), GameType::Flags);
        assert_eq!("states".parse::<GameType>().unwrap(), GameType::States);
        assert!("capitals".parse::<GameType>().is_err());
        // The set is closed and case-sensitive
        assert!("Countries".parse::<GameType>().is_err());
    }

    #[test]
    fn test_period_cutoffs() {
        let now = Utc.with_ymd_and_hms(2025, 3, 31, 12, 0, 0).unwrap();

        assert_eq!(LeaderboardPeriod::AllTime.cutoff(now), None);
        assert_eq!(
            LeaderboardPeriod::Week.cutoff(now),
            Some(Utc.with_ymd_and_hms(2025, 3, 24, 12, 0, 0).unwrap())
        );
        // Calendar month, clamped to the last valid day
        assert_eq!(
            LeaderboardPeriod::Month.cutoff(now),
            Some(Utc.with_ymd_and_hms(2025, 2, 28, 12, 0, 0).unwrap())
        );
        assert_eq!(
            LeaderboardPeriod::Year.cutoff(now),
            Some(Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_period_parse_and_display() {
        assert_eq!("all-time".parse::<LeaderboardPeriod>().unwrap(), LeaderboardPeriod::AllTime);
        assert_eq!(LeaderboardPeriod::Week.to_string(), "week");
        assert!("quarter".parse::<LeaderboardPeriod>().is_err());
    }
}
