//! NTTIME: 100 nanosecond intervals since 1601-01-01 00:00:00 UTC.

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "chrono")]
use chrono::{DateTime, Utc};

#[cfg(feature = "chrono")]
const SECONDS_1601_TO_1970: i64 = 11_644_473_600;
#[cfg(feature = "chrono")]
const TICKS_PER_SECOND: u64 = 10_000_000;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NtTime(u64);

impl NtTime {
    pub const fn new(ticks: u64) -> Self {
        NtTime(ticks)
    }

    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// NTTIME 0 means "never set".
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Convert to a UTC date and time. Zero and unrepresentable values
    /// give `None`.
    #[cfg(feature = "chrono")]
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        if self.is_zero() {
            return None;
        }
        let secs = i64::try_from(self.0 / TICKS_PER_SECOND).ok()? - SECONDS_1601_TO_1970;
        let nanos = u32::try_from((self.0 % TICKS_PER_SECOND) * 100).ok()?;
        DateTime::from_timestamp(secs, nanos)
    }

    /// Convert from a UTC date and time. Instants before 1601 give `None`.
    #[cfg(feature = "chrono")]
    pub fn from_datetime(dt: DateTime<Utc>) -> Option<Self> {
        let secs = u64::try_from(dt.timestamp().checked_add(SECONDS_1601_TO_1970)?).ok()?;
        let ticks = secs
            .checked_mul(TICKS_PER_SECOND)?
            .checked_add(u64::from(dt.timestamp_subsec_nanos()) / 100)?;
        Some(NtTime(ticks))
    }
}

impl From<u64> for NtTime {
    fn from(ticks: u64) -> Self {
        NtTime(ticks)
    }
}

impl From<NtTime> for u64 {
    fn from(value: NtTime) -> Self {
        value.0
    }
}

impl fmt::Display for NtTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[cfg(feature = "chrono")]
        if let Some(dt) = self.to_datetime() {
            return write!(f, "{}", dt.to_rfc3339());
        }
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[cfg(feature = "chrono")]
    #[rstest(ticks, expected,
        case(116_444_736_000_000_000, "1970-01-01T00:00:00+00:00"),
        case(132_223_104_000_000_000, "2020-01-01T00:00:00+00:00"),
        case(132_223_104_000_000_001, "2020-01-01T00:00:00.000000100+00:00"),
    )]
    fn test_nttime_to_datetime(ticks: u64, expected: &str) {
        let dt = NtTime::new(ticks).to_datetime().unwrap();
        assert_eq!(expected, dt.to_rfc3339());
        assert_eq!(Some(NtTime::new(ticks)), NtTime::from_datetime(dt));
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn test_nttime_zero_has_no_datetime() {
        assert_eq!(None, NtTime::default().to_datetime());
        assert_eq!("0", NtTime::default().to_string());
    }

    #[test]
    fn test_nttime_serde_is_transparent() {
        let t = NtTime::new(42);
        assert_eq!("42", serde_json::to_string(&t).unwrap());
        assert_eq!(t, serde_json::from_str::<NtTime>("42").unwrap());
    }
}
