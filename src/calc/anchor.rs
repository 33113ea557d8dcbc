use crate::calc::workday::weekday_index;
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Owns the date every displayed range is computed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnchorNavigator {
    anchor: NaiveDate,
}

impl AnchorNavigator {
    pub fn new(today: NaiveDate) -> Self {
        AnchorNavigator { anchor: today }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn jump_to(&mut self, date: NaiveDate) {
        self.anchor = date;
    }

    /// Steps one day forward. With `skip_weekend`, a Saturday or Sunday
    /// landing rolls on to Monday.
    pub fn advance_day(&mut self, skip_weekend: bool) {
        let Some(next) = self.anchor.checked_add_days(Days::new(1)) else {
            return;
        };
        let extra = match next.weekday() {
            Weekday::Sat if skip_weekend => 2,
            Weekday::Sun if skip_weekend => 1,
            _ => 0,
        };
        if let Some(d) = next.checked_add_days(Days::new(extra)) {
            self.anchor = d;
        }
    }

    /// Mirror of `advance_day`: weekend landings roll back to Friday.
    pub fn retreat_day(&mut self, skip_weekend: bool) {
        let Some(prev) = self.anchor.checked_sub_days(Days::new(1)) else {
            return;
        };
        let extra = match prev.weekday() {
            Weekday::Sat if skip_weekend => 1,
            Weekday::Sun if skip_weekend => 2,
            _ => 0,
        };
        if let Some(d) = prev.checked_sub_days(Days::new(extra)) {
            self.anchor = d;
        }
    }

    /// Monday of the following week.
    pub fn advance_week(&mut self) {
        let offset = 7 - u64::from(weekday_index(self.anchor));
        if let Some(d) = self.anchor.checked_add_days(Days::new(offset)) {
            self.anchor = d;
        }
    }

    /// Monday of the preceding week.
    pub fn retreat_week(&mut self) {
        let offset = u64::from(weekday_index(self.anchor)) + 7;
        if let Some(d) = self.anchor.checked_sub_days(Days::new(offset)) {
            self.anchor = d;
        }
    }

    /// First day of the following month.
    pub fn advance_month(&mut self) {
        let (year, month) = match self.anchor.month() {
            12 => (self.anchor.year() + 1, 1),
            m => (self.anchor.year(), m + 1),
        };
        if let Some(d) = NaiveDate::from_ymd_opt(year, month, 1) {
            self.anchor = d;
        }
    }

    /// First day of the preceding month.
    pub fn retreat_month(&mut self) {
        let (year, month) = match self.anchor.month() {
            1 => (self.anchor.year() - 1, 12),
            m => (self.anchor.year(), m - 1),
        };
        if let Some(d) = NaiveDate::from_ymd_opt(year, month, 1) {
            self.anchor = d;
        }
    }
}
