//! Month grid for the streak calendar.

use std::collections::BTreeSet;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::error::ValidationError;

/// Column headers, Sunday first.
pub const DAYS_OF_WEEK: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub is_today: bool,
    pub is_completed: bool,
    pub is_past: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CalendarCell {
    /// Padding before the 1st so it lands under its weekday.
    Blank,
    Day(CalendarDay),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthView {
    first: NaiveDate,
}

impl MonthView {
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or(ValidationError::InvalidMonth { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// e.g. "October 2026"
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn previous(&self) -> Self {
        Self {
            first: self
                .first
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    pub fn next(&self) -> Self {
        Self {
            first: self
                .first
                .checked_add_months(Months::new(1))
                .unwrap_or(self.first),
        }
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next().first;
        if next == self.first {
            return 31;
        }
        (next - self.first).num_days() as u32
    }

    /// Leading blanks, then every day of the month.
    pub fn cells(&self, today: NaiveDate, completed: &BTreeSet<NaiveDate>) -> Vec<CalendarCell> {
        let leading = self.first.weekday().num_days_from_sunday() as usize;
        let mut cells = vec![CalendarCell::Blank; leading];
        cells.extend(self.first.iter_days().take(self.days_in_month() as usize).map(|date| {
            CalendarCell::Day(CalendarDay {
                date,
                day: date.day(),
                is_today: date == today,
                is_completed: completed.contains(&date),
                is_past: date < today,
            })
        }));
        cells
    }
}
