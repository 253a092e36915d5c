//! Weekly training statistics.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use super::history::InMemoryHistory;

/// Sessions per day the plan asks for.
const DAILY_TARGET: u32 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct DayStat {
    /// "Mon" .. "Sun"
    pub name: String,
    pub date: NaiveDate,
    pub completed: u32,
    pub target: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyStats {
    pub week_start: NaiveDate,
    pub days: Vec<DayStat>,
    /// Days so far this week with the target met.
    pub completed_days: u32,
    /// Days so far this week, today included, with the target missed.
    pub missed_days: u32,
    pub completion_rate_pct: f64,
}

impl WeeklyStats {
    /// Monday-to-Sunday week containing `today`.
    pub fn from_history(history: &InMemoryHistory, today: NaiveDate) -> Self {
        let week_start = today - Duration::days(today.weekday().num_days_from_monday() as i64);
        let records = history.records();

        let days: Vec<DayStat> = week_start
            .iter_days()
            .take(7)
            .map(|date| DayStat {
                name: date.format("%a").to_string(),
                date,
                completed: records
                    .iter()
                    .filter(|r| r.is_completed() && r.day() == date)
                    .count() as u32,
                target: DAILY_TARGET,
            })
            .collect();

        let elapsed: Vec<&DayStat> = days.iter().filter(|d| d.date <= today).collect();
        let completed_days = elapsed.iter().filter(|d| d.completed >= d.target).count() as u32;
        let missed_days = elapsed.len() as u32 - completed_days;
        let completion_rate_pct = if elapsed.is_empty() {
            0.0
        } else {
            completed_days as f64 / elapsed.len() as f64 * 100.0
        };

        Self {
            week_start,
            days,
            completed_days,
            missed_days,
            completion_rate_pct,
        }
    }
}
