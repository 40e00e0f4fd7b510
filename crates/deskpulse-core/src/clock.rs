//! Wall-clock helpers shared by the store and the sentiment engine.
//!
//! All persisted timestamps are integer microseconds since the Unix epoch;
//! `DateTime<Utc>` is used at the model boundary so serialized views carry
//! RFC 3339 strings.

use chrono::{DateTime, Utc};

/// Current wall-clock time in microseconds since the Unix epoch.
#[must_use]
pub fn now_us() -> i64 {
    Utc::now().timestamp_micros()
}

/// Convert stored microseconds back to a `DateTime<Utc>`.
///
/// Out-of-range values (which cannot come from our own writes) collapse to
/// the epoch rather than panicking.
#[must_use]
pub fn us_to_datetime(us: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_micros(us).unwrap_or_default()
}

/// Convert a `DateTime<Utc>` to the stored microsecond representation.
#[must_use]
pub fn datetime_to_us(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_micros()
}

#[cfg(test)]
mod tests {
    use super::{datetime_to_us, now_us, us_to_datetime};

    #[test]
    fn roundtrip_preserves_microseconds() {
        let us = now_us();
        assert_eq!(datetime_to_us(us_to_datetime(us)), us);
    }

    #[test]
    fn out_of_range_collapses_to_epoch() {
        let ts = us_to_datetime(i64::MAX);
        assert_eq!(ts.timestamp(), 0);
    }
}
