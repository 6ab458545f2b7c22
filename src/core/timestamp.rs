//! Client timestamps with sign-dependent units.
//!
//! The invoicing client sends dates as JSON numbers: non-negative values are
//! milliseconds since the Unix epoch (JavaScript convention), negative values
//! are **seconds** since the epoch. Both encodings must keep decoding exactly
//! this way; downstream clients rely on it.
//!
//! Birthdates are the exception: they have no floor, and values below it are
//! read as milliseconds, so `-1118102400000` and `-1118102400` both name the
//! same day in 1934.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Most negative raw value accepted, in the value's native unit (seconds).
pub const TIMESTAMP_FLOOR: i64 = -20_000_000_000;

/// Error returned when a raw timestamp cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampError {
    /// The rejected raw value.
    pub raw: i64,
    /// Why it was rejected.
    pub reason: String,
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid timestamp {}: {}", self.raw, self.reason)
    }
}

impl std::error::Error for TimestampError {}

/// A timestamp exactly as the client encoded it, not yet interpreted.
///
/// Accepts JSON integers and floats (`-1118102400.000` is common for
/// pre-1970 dates); fractional parts are truncated toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawTimestamp(pub i64);

impl RawTimestamp {
    /// Decode according to the sign rule.
    pub fn decode(self) -> Result<Timestamp, TimestampError> {
        Timestamp::from_raw(self.0)
    }

    /// Decode a birthdate, see [`Timestamp::from_raw_birthdate`].
    pub fn decode_birthdate(self) -> Result<Timestamp, TimestampError> {
        Timestamp::from_raw_birthdate(self.0)
    }
}

impl Serialize for RawTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for RawTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawVisitor;

        impl Visitor<'_> for RawVisitor {
            type Value = RawTimestamp;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a numeric timestamp")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(RawTimestamp(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i64::try_from(v)
                    .map(RawTimestamp)
                    .map_err(|_| E::custom(format!("timestamp {v} out of range")))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                if !v.is_finite() || v < i64::MIN as f64 || v > i64::MAX as f64 {
                    return Err(E::custom(format!("timestamp {v} out of range")));
                }
                Ok(RawTimestamp(v.trunc() as i64))
            }
        }

        deserializer.deserialize_any(RawVisitor)
    }
}

/// A decoded point in time (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Decode a raw client value: milliseconds when non-negative, seconds
    /// when negative. Values below [`TIMESTAMP_FLOOR`] are rejected.
    pub fn from_raw(raw: i64) -> Result<Self, TimestampError> {
        if raw < TIMESTAMP_FLOOR {
            return Err(TimestampError {
                raw,
                reason: format!("negative timestamps below {TIMESTAMP_FLOOR} are not allowed"),
            });
        }
        let decoded = if raw >= 0 {
            DateTime::from_timestamp_millis(raw)
        } else {
            DateTime::from_timestamp(raw, 0)
        };
        decoded.map(Self).ok_or_else(|| out_of_range(raw))
    }

    /// Decode a birthdate. Values at or above [`TIMESTAMP_FLOOR`] follow the
    /// sign rule; anything below it is milliseconds.
    pub fn from_raw_birthdate(raw: i64) -> Result<Self, TimestampError> {
        if raw >= TIMESTAMP_FLOOR {
            return Self::from_raw(raw);
        }
        DateTime::from_timestamp_millis(raw)
            .map(Self)
            .ok_or_else(|| out_of_range(raw))
    }

    /// Wrap an already decoded UTC date-time.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// The raw value the client would send for this instant.
    pub fn to_raw(&self) -> i64 {
        let millis = self.millis();
        if millis >= 0 {
            millis
        } else {
            self.0.timestamp()
        }
    }

    /// Milliseconds since the Unix epoch, regardless of how it was encoded.
    pub fn millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Calendar date in UTC.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }
}

fn out_of_range(raw: i64) -> TimestampError {
    TimestampError {
        raw,
        reason: "out of the representable date range".into(),
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.to_raw())
    }
}
