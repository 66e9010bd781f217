use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use thiserror::Error;

pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// A wall-clock time with whole-second precision and no date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a zero-padded HH:MM:SS time of day")]
pub struct InvalidTimeOfDay;

impl TimeOfDay {
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    /// `None` for `seconds >= SECONDS_PER_DAY`.
    pub fn from_seconds(seconds: u32) -> Option<Self> {
        NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).map(Self)
    }

    /// Parse strictly `HH:MM:SS`: 24-hour, two digits per field, no leap seconds.
    pub fn parse(s: &str) -> Result<Self, InvalidTimeOfDay> {
        let bytes = s.as_bytes();
        if bytes.len() != 8 || bytes[2] != b':' || bytes[5] != b':' {
            return Err(InvalidTimeOfDay);
        }
        let field = |at: usize| -> Result<u32, InvalidTimeOfDay> {
            let (hi, lo) = (bytes[at], bytes[at + 1]);
            if hi.is_ascii_digit() && lo.is_ascii_digit() {
                Ok(u32::from(hi - b'0') * 10 + u32::from(lo - b'0'))
            } else {
                Err(InvalidTimeOfDay)
            }
        };
        Self::from_hms(field(0)?, field(3)?, field(6)?).ok_or(InvalidTimeOfDay)
    }

    pub fn seconds_from_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight()
    }
}

impl FromStr for TimeOfDay {
    type Err = InvalidTimeOfDay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_seconds_since_midnight() {
        assert_eq!(TimeOfDay::from_seconds(28_810).unwrap().to_string(), "08:00:10");
        assert_eq!(TimeOfDay::from_seconds(SECONDS_PER_DAY - 1).unwrap().to_string(), "23:59:59");
        assert_eq!(TimeOfDay::from_seconds(SECONDS_PER_DAY), None);
    }

    #[test]
    fn parses_zero_padded_times() {
        let t = TimeOfDay::parse("08:00:10").unwrap();
        assert_eq!(t, TimeOfDay::from_hms(8, 0, 10).unwrap());
        assert_eq!(t.seconds_from_midnight(), 8 * 3600 + 10);
        assert_eq!(t.to_string(), "08:00:10");

        assert_eq!(TimeOfDay::parse("00:00:00").unwrap().seconds_from_midnight(), 0);
        assert_eq!(
            TimeOfDay::parse("23:59:59").unwrap().seconds_from_midnight(),
            SECONDS_PER_DAY - 1
        );
    }

    #[test]
    fn rejects_out_of_range_fields() {
        for raw in ["24:00:00", "25:61:00", "12:60:00", "12:00:60", "99:99:99"] {
            assert_eq!(TimeOfDay::parse(raw), Err(InvalidTimeOfDay), "{raw}");
        }
    }

    #[test]
    fn rejects_malformed_text() {
        for raw in [
            "not-a-time",
            "",
            "8:00:00",
            "08:00",
            "08:00:00 ",
            " 08:00:00",
            "08-00-00",
            "08:00:0a",
            "08:00:00.5",
            "+8:00:00",
        ] {
            assert!(raw.parse::<TimeOfDay>().is_err(), "{raw:?}");
        }
    }

    #[test]
    fn orders_by_clock_time() {
        let a: TimeOfDay = "07:59:59".parse().unwrap();
        let b: TimeOfDay = "08:00:00".parse().unwrap();
        assert!(a < b);
    }
}
