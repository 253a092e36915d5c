use serde::Serialize;
use uuid::Uuid;

use super::motion::Position;
use super::state::{SessionState, SwitchTrigger};

/// Colour band of the session clock bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBand {
    Green,
    Yellow,
    Red,
}

impl TimeBand {
    /// Green above 66% remaining, yellow above 33%, red otherwise.
    pub fn for_pct(remaining_pct: f64) -> Self {
        if remaining_pct > 66.0 {
            TimeBand::Green
        } else if remaining_pct > 33.0 {
            TimeBand::Yellow
        } else {
            TimeBand::Red
        }
    }
}

/// Everything the presentation layer reads from a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub state: SessionState,
    pub is_paused: bool,
    pub is_ended: bool,
    pub remaining_secs: u64,
    /// `MM:SS`
    pub remaining_display: String,
    pub total_secs: u64,
    pub remaining_pct: f64,
    pub time_band: TimeBand,
    pub current_exercise_index: usize,
    pub exercise_count: usize,
    pub exercise_id: Option<String>,
    pub exercise_title: Option<String>,
    pub exercise_time_left: u64,
    /// `M:SS`
    pub exercise_time_display: String,
    pub exercise_completed: bool,
    pub exercise_progress_pct: f64,
    pub target: Option<Position>,
    pub distractors: Vec<Position>,
    pub switch_trigger: Option<SwitchTrigger>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_band_thresholds() {
        assert_eq!(TimeBand::for_pct(100.0), TimeBand::Green);
        assert_eq!(TimeBand::for_pct(66.0), TimeBand::Yellow);
        assert_eq!(TimeBand::for_pct(50.0), TimeBand::Yellow);
        assert_eq!(TimeBand::for_pct(33.0), TimeBand::Red);
        assert_eq!(TimeBand::for_pct(0.0), TimeBand::Red);
    }
}
