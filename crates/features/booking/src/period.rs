use crate::error::BookingError;
use chrono::NaiveDate;
use resbook_domain::constants::EMPTY_PLACEHOLDER;
use resbook_domain::slot::parse_date;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive number of calendar days from `start` to `end` (same day is 1).
#[must_use]
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// `"-"`, `"<start> 至 长期"` or `"<start> - <end> (<days>天)"`.
///
/// The day count is left out when either date does not parse.
#[must_use]
pub fn format_range(start: Option<&str>, end: Option<&str>) -> String {
    let Some(start) = present(start) else {
        return EMPTY_PLACEHOLDER.to_owned();
    };
    let Some(end) = present(end) else {
        return format!("{start} 至 长期");
    };

    match (parse_date(start), parse_date(end)) {
        (Some(s), Some(e)) => format!("{start} - {end} ({}天)", days_between(s, e)),
        _ => format!("{start} - {end}"),
    }
}

/// `"-"`, `"长期预约"`, `"单日预约"` or `"<days>天"`.
#[must_use]
pub fn describe_period(start: Option<&str>, end: Option<&str>) -> String {
    let Some(start) = present(start) else {
        return EMPTY_PLACEHOLDER.to_owned();
    };
    let Some(end) = present(end) else {
        return "长期预约".to_owned();
    };
    if start == end {
        return "单日预约".to_owned();
    }

    match (parse_date(start), parse_date(end)) {
        (Some(s), Some(e)) => format!("{}天", days_between(s, e)),
        _ => EMPTY_PLACEHOLDER.to_owned(),
    }
}

/// A reservation date range. `end == None` is a long-term reservation with no end date,
/// which is not the same as a single day (`start == end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationPeriod {
    #[serde(rename = "start_date")]
    start: NaiveDate,
    #[serde(rename = "end_date", default, skip_serializing_if = "Option::is_none")]
    end: Option<NaiveDate>,
}

impl ReservationPeriod {
    /// # Errors
    /// Returns [`BookingError::InvalidPeriod`] if `end` is before `start`.
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Result<Self, BookingError> {
        if let Some(end) = end
            && end < start
        {
            return Err(BookingError::InvalidPeriod {
                message: format!("end date {end} is before start date {start}").into(),
                context: None,
            });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn long_term(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    #[must_use]
    pub const fn single_day(date: NaiveDate) -> Self {
        Self { start: date, end: Some(date) }
    }

    /// Parses `YYYY-MM-DD` bounds; an absent or blank end means long-term.
    ///
    /// # Errors
    /// Returns [`BookingError::InvalidDate`] for a malformed date and
    /// [`BookingError::InvalidPeriod`] if the end precedes the start.
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self, BookingError> {
        let start = parse_required(start)?;
        let end = present(end).map(parse_required).transpose()?;
        Self::new(start, end)
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    #[must_use]
    pub const fn is_long_term(&self) -> bool {
        self.end.is_none()
    }

    #[must_use]
    pub fn is_single_day(&self) -> bool {
        self.end == Some(self.start)
    }

    /// Inclusive day count; `None` for long-term reservations.
    #[must_use]
    pub fn days(&self) -> Option<i64> {
        self.end.map(|end| days_between(self.start, end))
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && self.end.is_none_or(|end| date <= end)
    }

    #[must_use]
    pub fn describe(&self) -> String {
        let (start, end) = self.bounds();
        describe_period(Some(&start), end.as_deref())
    }

    fn bounds(&self) -> (String, Option<String>) {
        (self.start.to_string(), self.end.map(|d| d.to_string()))
    }
}

impl fmt::Display for ReservationPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = self.bounds();
        f.write_str(&format_range(Some(&start), end.as_deref()))
    }
}

fn parse_required(raw: &str) -> Result<NaiveDate, BookingError> {
    parse_date(raw.trim()).ok_or_else(|| BookingError::InvalidDate {
        message: format!("'{raw}' is not a YYYY-MM-DD date").into(),
        context: None,
    })
}
