//! Focus phase runner.
//!
//! Walks the exercise catalogue in order. Each exercise runs its own
//! countdown, then a short dwell so the "exercise complete" screen stays up,
//! then waits for the controller to call [`FocusRunner::advance`].
//!
//! ```text
//! Active --(sub-timer 0)--> Dwell --(dwell 0)--> [advance] --> Active(next)
//!                                                          \-> Exhausted
//! ```

use serde::Serialize;

use super::exercise::{ExerciseCatalogue, ExerciseDefinition};
use super::motion::MotionField;
use crate::timer::{Countdown, Tick};

/// Seconds the completion screen stays up before moving on.
pub const DWELL_SECS: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseStage {
    Active,
    Dwell,
    /// Dwell elapsed; waiting for `advance()`.
    AwaitingAdvance,
    Exhausted,
}

/// What one runner tick produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerSignal {
    /// Sub-timer hit zero; dwell begins.
    ExerciseCompleted { index: usize },
    /// Dwell is over; the owner should call `advance()`.
    DwellElapsed { index: usize },
}

/// Outcome of `advance()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Next exercise seeded and running.
    Next { index: usize },
    /// The last exercise was just consumed. Returned once.
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct FocusRunner {
    catalogue: ExerciseCatalogue,
    current_index: usize,
    stage: ExerciseStage,
    exercise_timer: Countdown,
    dwell_timer: Countdown,
    motion: MotionField,
    paused: bool,
}

impl FocusRunner {
    /// Build a runner positioned on the first exercise, already running.
    pub fn new(catalogue: ExerciseCatalogue, motion_seed: Option<u64>) -> Self {
        let first = catalogue.get(0).map(|e| e.duration_secs).unwrap_or(0);
        let stage = if catalogue.is_empty() {
            ExerciseStage::Exhausted
        } else {
            ExerciseStage::Active
        };
        let mut runner = Self {
            catalogue,
            current_index: 0,
            stage,
            exercise_timer: Countdown::new(first),
            dwell_timer: Countdown::new(DWELL_SECS),
            motion: MotionField::new(motion_seed),
            paused: false,
        };
        if runner.stage == ExerciseStage::Active {
            runner.exercise_timer.start();
        }
        runner
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn exercise_count(&self) -> usize {
        self.catalogue.len()
    }

    pub fn current_exercise(&self) -> Option<&ExerciseDefinition> {
        self.catalogue.get(self.current_index)
    }

    pub fn stage(&self) -> ExerciseStage {
        self.stage
    }

    pub fn exercise_time_left(&self) -> u64 {
        self.exercise_timer.remaining_secs()
    }

    pub fn is_exercise_completed(&self) -> bool {
        matches!(
            self.stage,
            ExerciseStage::Dwell | ExerciseStage::AwaitingAdvance
        )
    }

    pub fn is_exhausted(&self) -> bool {
        self.stage == ExerciseStage::Exhausted
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn motion(&self) -> &MotionField {
        &self.motion
    }

    /// 0.0 .. 100.0 across all exercises, counting a finished one as done.
    pub fn progress_pct(&self) -> f64 {
        let n = self.catalogue.len();
        if n == 0 {
            return 100.0;
        }
        let done = self.current_index + usize::from(self.is_exercise_completed());
        (done.min(n) as f64 / n as f64) * 100.0
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Suspend sub-timer, dwell and motion together.
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.exercise_timer.pause();
        self.dwell_timer.pause();
    }

    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.exercise_timer.resume();
        self.dwell_timer.resume();
    }

    /// Cancel every timer the runner holds.
    pub fn stop(&mut self) {
        self.exercise_timer.stop();
        self.dwell_timer.stop();
    }

    pub fn tick(&mut self) -> Option<RunnerSignal> {
        if self.paused {
            return None;
        }
        match self.stage {
            ExerciseStage::Active => {
                self.motion.step();
                match self.exercise_timer.tick() {
                    Tick::Finished => {
                        self.stage = ExerciseStage::Dwell;
                        self.dwell_timer.reseed(DWELL_SECS);
                        self.dwell_timer.start();
                        Some(RunnerSignal::ExerciseCompleted {
                            index: self.current_index,
                        })
                    }
                    Tick::Decremented(_) | Tick::Idle => None,
                }
            }
            ExerciseStage::Dwell => match self.dwell_timer.tick() {
                Tick::Finished => {
                    self.stage = ExerciseStage::AwaitingAdvance;
                    Some(RunnerSignal::DwellElapsed {
                        index: self.current_index,
                    })
                }
                Tick::Decremented(_) | Tick::Idle => None,
            },
            ExerciseStage::AwaitingAdvance | ExerciseStage::Exhausted => None,
        }
    }

    /// Move past the current exercise. `None` once exhausted.
    pub fn advance(&mut self) -> Option<Advance> {
        if self.stage == ExerciseStage::Exhausted {
            return None;
        }
        self.exercise_timer.stop();
        self.dwell_timer.stop();
        self.current_index += 1;

        let Some(next) = self.catalogue.get(self.current_index) else {
            self.current_index = self.catalogue.len();
            self.stage = ExerciseStage::Exhausted;
            return Some(Advance::Exhausted);
        };

        self.exercise_timer.reseed(next.duration_secs);
        self.exercise_timer.start();
        if self.paused {
            self.exercise_timer.pause();
        }
        self.motion.reset();
        self.stage = ExerciseStage::Active;
        Some(Advance::Next {
            index: self.current_index,
        })
    }
}
