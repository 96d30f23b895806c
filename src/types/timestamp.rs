use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Input formats accepted when parsing a timestamp.
const TIMESTAMP_FORMATS: [&str; 2] = [
    "%Y-%m-%d %H:%M:%S", // 1991-01-08 04:05:06
    "%Y-%m-%dT%H:%M:%S", // 1991-01-08T04:05:06
];

/// A point in time, stored as microseconds since the Unix epoch.
#[derive(
    PartialOrd, Ord, PartialEq, Eq, Debug, Copy, Clone, Default, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(i64);

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseTimestampError {
    #[error("invalid string: {0}")]
    InvalidString(String),
}

impl Timestamp {
    pub const fn new(micros: i64) -> Self {
        Self(micros)
    }

    pub const fn get_inner(&self) -> i64 {
        self.0
    }
}

impl Display for Timestamp {
    /// ISO 8601 format: `YYYY-MM-DD HH:MM:SS`
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let dt = DateTime::from_timestamp_micros(self.0).ok_or(std::fmt::Error)?;
        write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
    }
}

impl FromStr for Timestamp {
    type Err = ParseTimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for fmt in TIMESTAMP_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(Self(dt.and_utc().timestamp_micros()));
            }
        }
        Err(ParseTimestampError::InvalidString(s.to_string()))
    }
}
