//! Wall-clock time and weekday primitives.
//!
//! # Time Model
//! A timetable covers one repeating week. Times are minutes since midnight
//! (`ClockTime`); dates never appear. Slot arithmetic happens on indices into
//! a [`TimeGrid`](super::TimeGrid), so `ClockTime` is only used at the edges:
//! configuration, slot labels, and exported placements.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A time of day with minute precision.
///
/// Serialized as `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Latest representable time (23:59).
    pub const MAX_MINUTES: u16 = 24 * 60 - 1;

    /// Creates a time from hours and minutes.
    ///
    /// Out-of-range values saturate at 23:59.
    pub const fn hm(hours: u16, minutes: u16) -> Self {
        let total = hours * 60 + minutes;
        if total > Self::MAX_MINUTES {
            Self(Self::MAX_MINUTES)
        } else {
            Self(total)
        }
    }

    /// Creates a time from minutes since midnight.
    pub const fn from_minutes(minutes: u16) -> Self {
        if minutes > Self::MAX_MINUTES {
            Self(Self::MAX_MINUTES)
        } else {
            Self(minutes)
        }
    }

    /// Minutes since midnight.
    #[inline]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    /// Returns this time shifted by `minutes`, or `None` past midnight.
    pub fn plus_minutes(self, minutes: u32) -> Option<Self> {
        let total = u32::from(self.0) + minutes;
        if total > 24 * 60 {
            None
        } else {
            // 24:00 is allowed as an exclusive end bound.
            Some(Self(total as u16))
        }
    }

    /// Minutes from `self` to `later` (0 if `later` is earlier).
    pub fn minutes_until(self, later: Self) -> u32 {
        u32::from(later.0.saturating_sub(self.0))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for ClockTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("expected HH:MM, got '{s}'"))?;
        let hours: u16 = h
            .parse()
            .map_err(|_| format!("invalid hour in '{s}'"))?;
        let minutes: u16 = m
            .parse()
            .map_err(|_| format!("invalid minute in '{s}'"))?;
        if minutes >= 60 || hours > 24 || (hours == 24 && minutes > 0) {
            return Err(format!("time out of range: '{s}'"));
        }
        Ok(Self(hours * 60 + minutes))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Monday through Friday.
    pub const WORKWEEK: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Full English name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
