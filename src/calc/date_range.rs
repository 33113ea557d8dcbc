use crate::calc::workday::{days_in_month, weekday_index};
use crate::nav::ViewMode;
use chrono::{Datelike, Days, NaiveDate};
use thiserror::Error;

/// Key format shared with the timetable file; sessions are looked up by it.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A calendar date as the rest of the app sees it: the lookup key plus the
/// Monday-based weekday index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateDescriptor {
    pub date: NaiveDate,
    pub key: String,
    pub weekday: u32,
}

impl DateDescriptor {
    pub fn new(date: NaiveDate) -> Self {
        DateDescriptor {
            date,
            key: date_key(date),
            weekday: weekday_index(date),
        }
    }

    pub fn is_weekend(&self) -> bool {
        self.weekday >= 5
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid date keyword: {0}")]
pub struct InvalidKeyword(pub String);

/// Parses a range keyword. No keyword, `today`, `now` and `day` all mean a
/// single day.
pub fn parse_keyword(keyword: Option<&str>) -> Result<ViewMode, InvalidKeyword> {
    match keyword {
        None | Some("today" | "now" | "day") => Ok(ViewMode::Day),
        Some("week") => Ok(ViewMode::Week),
        Some("month") => Ok(ViewMode::Month),
        Some(other) => Err(InvalidKeyword(other.to_string())),
    }
}

/// Dates for `keyword` around `anchor`. An unknown keyword yields an error the
/// caller is expected to report and replace with an empty range.
pub fn generate(
    anchor: NaiveDate,
    keyword: Option<&str>,
) -> Result<Vec<DateDescriptor>, InvalidKeyword> {
    parse_keyword(keyword).map(|mode| range_for(anchor, mode))
}

pub fn range_for(anchor: NaiveDate, mode: ViewMode) -> Vec<DateDescriptor> {
    match mode {
        ViewMode::Day => day(anchor),
        ViewMode::Week => week(anchor),
        ViewMode::Month => month(anchor),
    }
}

pub fn day(anchor: NaiveDate) -> Vec<DateDescriptor> {
    vec![DateDescriptor::new(anchor)]
}

/// Monday through Friday of the ISO week containing `anchor`.
pub fn week(anchor: NaiveDate) -> Vec<DateDescriptor> {
    let offset = u64::from(weekday_index(anchor));
    let Some(monday) = anchor.checked_sub_days(Days::new(offset)) else {
        return Vec::new();
    };
    (0..5)
        .filter_map(|i| monday.checked_add_days(Days::new(i)))
        .map(DateDescriptor::new)
        .collect()
}

/// Every day of the anchor's month, weekends included.
pub fn month(anchor: NaiveDate) -> Vec<DateDescriptor> {
    let (year, month) = (anchor.year(), anchor.month());
    (1..=days_in_month(year, month))
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .map(DateDescriptor::new)
        .collect()
}
