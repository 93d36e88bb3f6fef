//! # Timestamp Value Object
//!
//! UTC point in time used for order expiry.
//!
//! # Examples
//!
//! ```
//! use liquidity_aggregator::domain::value_objects::Timestamp;
//!
//! let expiry = Timestamp::from_secs(1_704_067_200).unwrap();
//! assert_eq!(expiry.timestamp_secs(), 1_704_067_200);
//! assert!(expiry.is_expired());
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp wrapping `chrono::DateTime<Utc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` if the value is out of range.
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Returns the Unix timestamp in seconds.
    #[inline]
    #[must_use]
    pub fn timestamp_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Returns true if this timestamp is in the past.
    ///
    /// # Examples
    ///
    /// ```
    /// use liquidity_aggregator::domain::value_objects::Timestamp;
    ///
    /// assert!(Timestamp::from_secs(0).unwrap().is_expired());
    /// assert!(!Timestamp::from_secs(4_102_444_800).unwrap().is_expired());
    /// ```
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.0 < Utc::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_secs_roundtrips() {
        let ts = Timestamp::from_secs(1_704_067_200).unwrap();
        assert_eq!(ts.timestamp_secs(), 1_704_067_200);
        assert!(ts.to_string().contains("2024-01-01"));
    }

    #[test]
    fn serde_is_transparent() {
        let ts = Timestamp::from_secs(0).unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"1970-01-01T00:00:00Z\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}
