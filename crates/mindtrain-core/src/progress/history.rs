use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shown as session accuracy until real scoring exists.
pub const PLACEHOLDER_ACCURACY_PCT: u8 = 82;
/// Shown as response-time change until real scoring exists.
pub const PLACEHOLDER_RESPONSE_DELTA_PCT: i8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionOutcome {
    /// The session clock ran out.
    Completed,
    /// The user left before the clock ran out.
    Ended,
}

impl SessionOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionOutcome::Completed => "completed",
            SessionOutcome::Ended => "ended",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcome: SessionOutcome,
    pub elapsed_secs: u64,
    pub exercises_completed: usize,
    pub completion_pct: u8,
    pub accuracy_pct: u8,
    pub response_delta_pct: i8,
}

impl SessionRecord {
    pub fn new(
        id: Uuid,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        outcome: SessionOutcome,
        elapsed_secs: u64,
        total_secs: u64,
        exercises_completed: usize,
    ) -> Self {
        let completion_pct = match outcome {
            SessionOutcome::Completed => 100,
            SessionOutcome::Ended if total_secs == 0 => 0,
            SessionOutcome::Ended => (elapsed_secs.min(total_secs) * 100 / total_secs) as u8,
        };
        Self {
            id,
            started_at,
            finished_at,
            outcome,
            elapsed_secs,
            exercises_completed,
            completion_pct,
            accuracy_pct: PLACEHOLDER_ACCURACY_PCT,
            response_delta_pct: PLACEHOLDER_RESPONSE_DELTA_PCT,
        }
    }

    /// Calendar day (UTC) the session finished on.
    pub fn day(&self) -> NaiveDate {
        self.finished_at.date_naive()
    }

    pub fn is_completed(&self) -> bool {
        self.outcome == SessionOutcome::Completed
    }
}

/// Where finished sessions go.
pub trait SessionRecorder {
    fn record(&mut self, record: SessionRecord);
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryHistory {
    records: Vec<SessionRecord>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Newest first.
    pub fn records(&self) -> Vec<&SessionRecord> {
        let mut out: Vec<_> = self.records.iter().collect();
        out.sort_by(|a, b| b.finished_at.cmp(&a.finished_at));
        out
    }

    pub fn completed_days(&self) -> BTreeSet<NaiveDate> {
        self.records
            .iter()
            .filter(|r| r.is_completed())
            .map(SessionRecord::day)
            .collect()
    }

    /// Consecutive completed days ending today, or ending yesterday when
    /// today has no completed session yet.
    pub fn current_streak(&self, today: NaiveDate) -> u32 {
        let days = self.completed_days();
        let mut cursor = if days.contains(&today) {
            today
        } else {
            today - Duration::days(1)
        };
        let mut streak = 0;
        while days.contains(&cursor) {
            streak += 1;
            cursor -= Duration::days(1);
        }
        streak
    }

    /// Longest run of consecutive completed days on record.
    pub fn best_streak(&self) -> u32 {
        let mut best = 0;
        let mut run = 0;
        let mut previous: Option<NaiveDate> = None;
        for day in self.completed_days() {
            run = match previous {
                Some(p) if day - p == Duration::days(1) => run + 1,
                _ => 1,
            };
            best = best.max(run);
            previous = Some(day);
        }
        best
    }
}

impl SessionRecorder for InMemoryHistory {
    fn record(&mut self, record: SessionRecord) {
        self.records.push(record);
    }
}
