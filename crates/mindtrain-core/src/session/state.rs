use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle of one training session. Pausing is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    FocusExercise,
    Quiz,
    Completed,
}

impl SessionState {
    /// `FocusExercise` or `Quiz`.
    pub fn is_active(self) -> bool {
        matches!(self, SessionState::FocusExercise | SessionState::Quiz)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::NotStarted => "not_started",
            SessionState::FocusExercise => "focus_exercise",
            SessionState::Quiz => "quiz",
            SessionState::Completed => "completed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What caused the switch from the focus phase to the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchTrigger {
    /// Every focus exercise finished.
    ExercisesExhausted,
    /// Half of the session clock elapsed first.
    HalfTime,
}
