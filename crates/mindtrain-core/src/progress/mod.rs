//! History, streak calendar and weekly statistics.
//!
//! Nothing here is persisted. [`SessionRecorder`] is the seam where a storage
//! layer would attach; [`InMemoryHistory`] is the process-lifetime default.

mod calendar;
mod history;
mod stats;

pub use calendar::{CalendarCell, CalendarDay, MonthView, DAYS_OF_WEEK};
pub use history::{
    InMemoryHistory, SessionOutcome, SessionRecord, SessionRecorder, PLACEHOLDER_ACCURACY_PCT,
    PLACEHOLDER_RESPONSE_DELTA_PCT,
};
pub use stats::{DayStat, WeeklyStats};
