use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{SessionState, SwitchTrigger};

/// Every state change of a session produces an Event.
/// The presentation layer polls for them; toasts are derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionStarted {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    SessionPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// An exercise's own timer ran out; the completion dwell begins.
    ExerciseCompleted {
        index: usize,
        exercise_id: String,
        at: DateTime<Utc>,
    },
    ExerciseStarted {
        index: usize,
        exercise_id: String,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// The last focus exercise has been consumed.
    FocusExhausted {
        exercises_completed: usize,
        at: DateTime<Utc>,
    },
    PhaseSwitched {
        from: SessionState,
        to: SessionState,
        trigger: SwitchTrigger,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        at: DateTime<Utc>,
    },
    /// Manual exit; the session never reached `Completed`.
    SessionEnded {
        state: SessionState,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
}

/// Notification text for the toast collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub title: &'static str,
    pub description: &'static str,
}

impl Event {
    /// Short machine name, matching the serde tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::SessionStarted { .. } => "session_started",
            Event::SessionPaused { .. } => "session_paused",
            Event::SessionResumed { .. } => "session_resumed",
            Event::ExerciseCompleted { .. } => "exercise_completed",
            Event::ExerciseStarted { .. } => "exercise_started",
            Event::FocusExhausted { .. } => "focus_exhausted",
            Event::PhaseSwitched { .. } => "phase_switched",
            Event::SessionCompleted { .. } => "session_completed",
            Event::SessionEnded { .. } => "session_ended",
        }
    }

    /// Only the three headline lifecycle events raise a toast.
    pub fn toast(&self) -> Option<Toast> {
        match self {
            Event::SessionStarted { .. } => Some(Toast {
                title: "Session Started!",
                description: "Your 50-minute training session has begun",
            }),
            Event::PhaseSwitched { .. } => Some(Toast {
                title: "Starting Quiz Module",
                description: "Well done on the focus exercises! Now let's test your knowledge",
            }),
            Event::SessionCompleted { .. } => Some(Toast {
                title: "Session Completed!",
                description: "Great job completing today's training session",
            }),
            _ => None,
        }
    }
}
