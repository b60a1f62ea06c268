//! Time slots on the wire (`"YYYY-MM-DD HH:mm-HH:mm"`) and grouped by date.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Splits a wire slot on its single separating space.
///
/// Returns `None` unless the input contains exactly one space.
#[must_use]
pub fn split_wire(raw: &str) -> Option<(&str, &str)> {
    let (date, range) = raw.split_once(' ')?;
    if range.contains(' ') {
        return None;
    }
    Some((date, range))
}

/// Why a strictly parsed slot was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotParseError {
    Separator,
    Date(String),
    Time(String),
    EmptyRange,
}

impl fmt::Display for SlotParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Separator => f.write_str("expected exactly one space between date and time range"),
            Self::Date(raw) => write!(f, "invalid date '{raw}', expected YYYY-MM-DD"),
            Self::Time(raw) => write!(f, "invalid time range '{raw}', expected HH:mm-HH:mm"),
            Self::EmptyRange => f.write_str("time range must end after it starts"),
        }
    }
}

impl std::error::Error for SlotParseError {}

/// A validated bookable unit: one calendar date and a time range on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot {
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeSlot {
    /// Parses a wire slot, checking the calendar date and both `HH:mm` bounds.
    ///
    /// # Errors
    /// Returns a [`SlotParseError`] describing the first violated rule.
    pub fn parse(raw: &str) -> Result<Self, SlotParseError> {
        let (date, range) = split_wire(raw).ok_or(SlotParseError::Separator)?;
        let date = parse_date(date).ok_or_else(|| SlotParseError::Date(date.to_owned()))?;

        let time_err = || SlotParseError::Time(range.to_owned());
        let (start, end) = range.split_once('-').ok_or_else(time_err)?;
        let start = parse_time(start).ok_or_else(time_err)?;
        let end = parse_time(end).ok_or_else(time_err)?;
        if end <= start {
            return Err(SlotParseError::EmptyRange);
        }

        Ok(Self { date, start, end })
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    /// The `HH:mm-HH:mm` part.
    #[must_use]
    pub fn range(&self) -> String {
        format!("{}-{}", self.start.format(TIME_FORMAT), self.end.format(TIME_FORMAT))
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format(DATE_FORMAT), self.range())
    }
}

impl FromStr for TimeSlot {
    type Err = SlotParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parses a zero-padded `YYYY-MM-DD` calendar date.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let bytes = raw.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }
    NaiveTime::parse_from_str(raw, TIME_FORMAT).ok()
}

/// One entry of a [`SlotGroup`]: the server sends either a bare time range or an object
/// carrying `display_time` (plus fields the client does not use).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Slot {
    Raw(String),
    Described { display_time: String },
}

impl Slot {
    /// The time range shown to the user and sent back on the wire.
    #[must_use]
    pub fn display(&self) -> &str {
        match self {
            Self::Raw(time) | Self::Described { display_time: time } => time,
        }
    }
}

impl From<&str> for Slot {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_owned())
    }
}

impl From<String> for Slot {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

/// Date → slots, ordered by date. Slots within a date keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotGroup {
    dates: BTreeMap<String, Vec<Slot>>,
}

impl SlotGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `slot` to the list of `date`.
    pub fn push(&mut self, date: impl Into<String>, slot: impl Into<Slot>) {
        self.dates.entry(date.into()).or_default().push(slot.into());
    }

    #[must_use]
    pub fn get(&self, date: &str) -> Option<&[Slot]> {
        self.dates.get(date).map(Vec::as_slice)
    }

    /// Dates in ascending order.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.dates.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Slot])> {
        self.dates.iter().map(|(date, slots)| (date.as_str(), slots.as_slice()))
    }

    /// Number of distinct dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Total number of slots across all dates.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.dates.values().map(Vec::len).sum()
    }
}

impl<D: Into<String>, S: Into<Slot>> FromIterator<(D, S)> for SlotGroup {
    fn from_iter<T: IntoIterator<Item = (D, S)>>(iter: T) -> Self {
        let mut group = Self::new();
        for (date, slot) in iter {
            group.push(date, slot);
        }
        group
    }
}
