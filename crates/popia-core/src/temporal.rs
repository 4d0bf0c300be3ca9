//! # Receipt Timestamps
//!
//! [`Timestamp`] is a UTC instant with whole-second precision. It has one
//! textual form, `2026-10-15T08:00:00Z`, used both for display and in JSON.
//! Offsets other than `Z` and fractional seconds are rejected on input.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PopiaError;

const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A UTC instant, truncated to the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current time.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Wrap `dt`, dropping sub-second precision.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt.trunc_subsecs(0))
    }

    /// Parse the canonical `YYYY-MM-DDTHH:MM:SSZ` form.
    pub fn parse(s: &str) -> Result<Self, PopiaError> {
        NaiveDateTime::parse_from_str(s, FORMAT)
            .map(|naive| Self(Utc.from_utc_datetime(&naive)))
            .map_err(|e| PopiaError::InvalidTimestamp(format!("{s:?}: {e}")))
    }

    /// The underlying chrono value.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = PopiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = PopiaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_now_is_whole_seconds() {
        assert_eq!(Timestamp::now().as_datetime().nanosecond(), 0);
    }

    #[test]
    fn test_from_utc_truncates() {
        let dt = Utc
            .with_ymd_and_hms(2026, 10, 15, 9, 30, 45)
            .unwrap()
            .with_nanosecond(999_999_999)
            .unwrap();
        assert_eq!(Timestamp::from_utc(dt).to_string(), "2026-10-15T09:30:45Z");
    }

    #[test]
    fn test_parse_display_agree() {
        let ts: Timestamp = "2026-10-15T12:00:00Z".parse().unwrap();
        assert_eq!(ts.to_string(), "2026-10-15T12:00:00Z");
    }

    #[test]
    fn test_parse_rejects_other_forms() {
        for bad in [
            "2026-10-15T12:00:00+00:00",
            "2026-10-15T14:00:00+02:00",
            "2026-10-15T12:00:00.5Z",
            "2026-10-15",
            "not-a-date",
            "",
        ] {
            assert!(Timestamp::parse(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_json_is_a_string() {
        let ts = Timestamp::parse("2026-10-15T12:00:00Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2026-10-15T12:00:00Z\"");
        assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), ts);
        assert!(serde_json::from_str::<Timestamp>("\"2026-10-15\"").is_err());
    }

    #[test]
    fn test_ordering_follows_time() {
        let a = Timestamp::parse("2026-10-15T08:00:00Z").unwrap();
        let b = Timestamp::parse("2026-10-15T08:00:01Z").unwrap();
        assert!(a < b);
    }
}
