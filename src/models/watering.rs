use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::StoreError;

const TIME_FORMAT: &str = "%H:%M";

/// A time of day at minute precision, displayed as 24-hour `HH:mm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WateringTime(NaiveTime);

impl WateringTime {
    /// Build from an hour (0-23) and minute (0-59).
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl From<NaiveTime> for WateringTime {
    /// Seconds are dropped so two times that format alike compare equal.
    fn from(time: NaiveTime) -> Self {
        Self(time.with_second(0).and_then(|t| t.with_nanosecond(0)).unwrap_or(time))
    }
}

impl fmt::Display for WateringTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

impl FromStr for WateringTime {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), TIME_FORMAT)
            .map(Self)
            .map_err(|_| {
                StoreError::validation("watering_hours", format!("'{}' is not an HH:mm time", s))
            })
    }
}

impl Serialize for WateringTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WateringTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Daily watering times in the order they were added, without duplicates.
///
/// Duplicate insertions are ignored, so any sequence of inserts leaves at most
/// one entry per formatted `HH:mm` string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<WateringTime>")]
pub struct WateringHours(Vec<WateringTime>);

impl WateringHours {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `time` unless it is already present. Returns whether it was added.
    pub fn insert(&mut self, time: WateringTime) -> bool {
        if self.contains(time) {
            return false;
        }
        self.0.push(time);
        true
    }

    /// Returns whether `time` was present.
    pub fn remove(&mut self, time: WateringTime) -> bool {
        let before = self.0.len();
        self.0.retain(|t| *t != time);
        self.0.len() != before
    }

    pub fn contains(&self, time: WateringTime) -> bool {
        self.0.contains(&time)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WateringTime> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Formatted `HH:mm` strings in display order.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// Parse each entry as `HH:mm`, dropping duplicates.
    pub fn parse_all<I, S>(items: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        items
            .into_iter()
            .map(|s| s.as_ref().parse::<WateringTime>())
            .collect()
    }
}

impl FromIterator<WateringTime> for WateringHours {
    fn from_iter<T: IntoIterator<Item = WateringTime>>(iter: T) -> Self {
        let mut hours = Self::new();
        for time in iter {
            hours.insert(time);
        }
        hours
    }
}

impl From<Vec<WateringTime>> for WateringHours {
    fn from(times: Vec<WateringTime>) -> Self {
        times.into_iter().collect()
    }
}

impl fmt::Display for WateringHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strings().join(", "))
    }
}
