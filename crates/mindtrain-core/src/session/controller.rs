//! Session controller.
//!
//! Owns the master countdown, the session state and the focus runner for one
//! session. Like the countdown it has no thread of its own: the caller (the
//! driver, a test, the CLI simulator) delivers one `tick()` per second and
//! issues commands in between.
//!
//! ## State Transitions
//!
//! ```text
//! NotStarted -> FocusExercise -> Quiz -> Completed
//!                     \_________________/^
//! ```
//!
//! `FocusExercise -> Quiz` has two triggers (all exercises consumed, or half
//! the clock gone). Both go through [`SessionController::switch_to_quiz`],
//! which checks the state first, so the switch happens once.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::exercise::ExerciseCatalogue;
use super::focus::{Advance, FocusRunner, RunnerSignal};
use super::snapshot::{SessionSnapshot, TimeBand};
use super::state::{SessionState, SwitchTrigger};
use crate::error::TransitionError;
use crate::events::Event;
use crate::progress::{SessionOutcome, SessionRecord};
use crate::timer::{format_m_ss, format_mm_ss, Countdown, Tick};

/// Length of one session: 50 minutes.
pub const SESSION_TOTAL_SECS: u64 = 50 * 60;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub total_secs: u64,
    pub catalogue: ExerciseCatalogue,
    /// Seed for the cosmetic motion; `None` for OS entropy.
    pub motion_seed: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            total_secs: SESSION_TOTAL_SECS,
            catalogue: ExerciseCatalogue::standard(),
            motion_seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionController {
    options: SessionOptions,
    id: Uuid,
    state: SessionState,
    paused: bool,
    /// Set by `end()`; the controller is inert afterwards.
    ended: bool,
    master: Countdown,
    runner: Option<FocusRunner>,
    exercises_completed: usize,
    switch_trigger: Option<SwitchTrigger>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl SessionController {
    pub fn new(options: SessionOptions) -> Self {
        let master = Countdown::new(options.total_secs);
        Self {
            options,
            id: Uuid::new_v4(),
            state: SessionState::NotStarted,
            paused: false,
            ended: false,
            master,
            runner: None,
            exercises_completed: 0,
            switch_trigger: None,
            started_at: None,
            finished_at: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Completed or ended: no tick will ever change this controller again.
    pub fn is_finished(&self) -> bool {
        self.ended || self.state == SessionState::Completed
    }

    pub fn total_secs(&self) -> u64 {
        self.master.total_secs()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.master.remaining_secs()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.master.elapsed_secs()
    }

    pub fn switch_trigger(&self) -> Option<SwitchTrigger> {
        self.switch_trigger
    }

    pub fn exercises_completed(&self) -> usize {
        self.exercises_completed
    }

    pub fn runner(&self) -> Option<&FocusRunner> {
        self.runner.as_ref()
    }

    pub fn current_exercise_index(&self) -> usize {
        self.runner.as_ref().map(|r| r.current_index()).unwrap_or(0)
    }

    pub fn exercise_time_left(&self) -> u64 {
        self.runner
            .as_ref()
            .map(|r| r.exercise_time_left())
            .unwrap_or_else(|| {
                self.options
                    .catalogue
                    .get(0)
                    .map(|e| e.duration_secs)
                    .unwrap_or(0)
            })
    }

    /// Seconds at or below which the focus phase gives way to the quiz.
    pub fn half_time_secs(&self) -> u64 {
        self.master.total_secs() / 2
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let total = self.total_secs();
        let remaining = self.remaining_secs();
        let remaining_pct = if total == 0 {
            0.0
        } else {
            remaining as f64 / total as f64 * 100.0
        };
        let runner = self.runner.as_ref();
        let exercise = runner
            .and_then(|r| r.current_exercise())
            .or_else(|| self.options.catalogue.get(0));
        let exercise_time_left = self.exercise_time_left();

        SessionSnapshot {
            session_id: self.id,
            state: self.state,
            is_paused: self.paused,
            is_ended: self.ended,
            remaining_secs: remaining,
            remaining_display: format_mm_ss(remaining),
            total_secs: total,
            remaining_pct,
            time_band: TimeBand::for_pct(remaining_pct),
            current_exercise_index: self.current_exercise_index(),
            exercise_count: self.options.catalogue.len(),
            exercise_id: exercise.map(|e| e.id.clone()),
            exercise_title: exercise.map(|e| e.title.clone()),
            exercise_time_left,
            exercise_time_display: format_m_ss(exercise_time_left),
            exercise_completed: runner.map(|r| r.is_exercise_completed()).unwrap_or(false),
            exercise_progress_pct: runner.map(|r| r.progress_pct()).unwrap_or(0.0),
            target: runner.map(|r| r.motion().target()),
            distractors: runner
                .map(|r| r.motion().distractors().to_vec())
                .unwrap_or_default(),
            switch_trigger: self.switch_trigger,
        }
    }

    /// History entry for a session that has finished one way or another.
    pub fn summary(&self) -> Option<SessionRecord> {
        let started_at = self.started_at?;
        let outcome = match (self.state, self.ended) {
            (SessionState::Completed, _) => SessionOutcome::Completed,
            (_, true) => SessionOutcome::Ended,
            _ => return None,
        };
        Some(SessionRecord::new(
            self.id,
            started_at,
            self.finished_at.unwrap_or_else(Utc::now),
            outcome,
            self.elapsed_secs(),
            self.total_secs(),
            self.exercises_completed,
        ))
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// `NotStarted -> FocusExercise`. Any later call is rejected and leaves
    /// the running clock alone.
    pub fn start(&mut self) -> Result<Vec<Event>, TransitionError> {
        self.ensure_live()?;
        if self.state != SessionState::NotStarted {
            return Err(self.reject("start"));
        }

        self.master = Countdown::new(self.options.total_secs);
        self.master.start();
        let runner = FocusRunner::new(self.options.catalogue.clone(), self.options.motion_seed);
        let exhausted = runner.is_exhausted();
        self.runner = Some(runner);
        self.state = SessionState::FocusExercise;
        self.started_at = Some(Utc::now());
        info!(session = %self.id, total_secs = self.options.total_secs, "session started");

        let mut events = vec![Event::SessionStarted {
            total_secs: self.options.total_secs,
            at: Utc::now(),
        }];
        if self.options.total_secs == 0 {
            self.complete(&mut events);
        } else if exhausted {
            self.switch_to_quiz(SwitchTrigger::ExercisesExhausted, &mut events);
        }
        Ok(events)
    }

    /// Pause or resume the master clock and, during the focus phase, the
    /// runner, inside the same call.
    pub fn toggle_pause(&mut self) -> Result<Event, TransitionError> {
        self.ensure_live()?;
        if !self.state.is_active() {
            return Err(self.reject("toggle pause"));
        }

        let in_focus = self.state == SessionState::FocusExercise;
        let at = Utc::now();
        if self.paused {
            self.paused = false;
            self.master.resume();
            if in_focus {
                if let Some(runner) = self.runner.as_mut() {
                    runner.resume();
                }
            }
            info!(session = %self.id, remaining = self.remaining_secs(), "session resumed");
            Ok(Event::SessionResumed {
                remaining_secs: self.remaining_secs(),
                at,
            })
        } else {
            self.paused = true;
            self.master.pause();
            if in_focus {
                if let Some(runner) = self.runner.as_mut() {
                    runner.pause();
                }
            }
            info!(session = %self.id, remaining = self.remaining_secs(), "session paused");
            Ok(Event::SessionPaused {
                remaining_secs: self.remaining_secs(),
                at,
            })
        }
    }

    /// Move the runner past its current exercise. When that was the last one
    /// the session switches to the quiz.
    pub fn on_exercise_complete(&mut self) -> Result<Vec<Event>, TransitionError> {
        self.ensure_live()?;
        if self.state != SessionState::FocusExercise {
            return Err(self.reject("complete an exercise"));
        }
        let mut events = Vec::new();
        self.advance_runner(&mut events);
        Ok(events)
    }

    /// Manual exit. Stops every timer; the state is left as it was.
    /// Only a started, not yet completed session can be ended.
    pub fn end(&mut self) -> Result<Event, TransitionError> {
        self.ensure_live()?;
        if !self.state.is_active() {
            return Err(self.reject("end"));
        }
        self.ended = true;
        self.paused = false;
        self.stop_timers();
        self.finished_at = Some(Utc::now());
        info!(session = %self.id, state = %self.state, "session ended");
        Ok(Event::SessionEnded {
            state: self.state,
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        })
    }

    /// Deliver one second. Ignored unless the session is active and running.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        if self.ended || self.paused || !self.state.is_active() {
            return events;
        }

        match self.master.tick() {
            Tick::Finished => {
                self.complete(&mut events);
                return events;
            }
            Tick::Decremented(remaining) => {
                if remaining <= self.half_time_secs() {
                    self.switch_to_quiz(SwitchTrigger::HalfTime, &mut events);
                }
            }
            Tick::Idle => {
                debug_assert!(false, "master countdown idle while session active");
                return events;
            }
        }

        if self.state == SessionState::FocusExercise {
            self.tick_runner(&mut events);
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn ensure_live(&self) -> Result<(), TransitionError> {
        if self.ended {
            warn!(session = %self.id, "command on ended session");
            return Err(TransitionError::SessionEnded);
        }
        Ok(())
    }

    fn reject(&self, command: &'static str) -> TransitionError {
        warn!(session = %self.id, command, state = %self.state, "rejected session command");
        TransitionError::InvalidTransition {
            command,
            state: self.state,
        }
    }

    fn tick_runner(&mut self, events: &mut Vec<Event>) {
        let Some(runner) = self.runner.as_mut() else {
            return;
        };
        match runner.tick() {
            Some(RunnerSignal::ExerciseCompleted { index }) => {
                self.exercises_completed += 1;
                let exercise_id = runner
                    .current_exercise()
                    .map(|e| e.id.clone())
                    .unwrap_or_default();
                debug!(session = %self.id, index, %exercise_id, "exercise completed");
                events.push(Event::ExerciseCompleted {
                    index,
                    exercise_id,
                    at: Utc::now(),
                });
            }
            Some(RunnerSignal::DwellElapsed { .. }) => self.advance_runner(events),
            None => {}
        }
    }

    fn advance_runner(&mut self, events: &mut Vec<Event>) {
        let Some(runner) = self.runner.as_mut() else {
            return;
        };
        match runner.advance() {
            Some(Advance::Next { index }) => {
                let (exercise_id, duration_secs) = runner
                    .current_exercise()
                    .map(|e| (e.id.clone(), e.duration_secs))
                    .unwrap_or_default();
                debug!(session = %self.id, index, %exercise_id, "exercise started");
                events.push(Event::ExerciseStarted {
                    index,
                    exercise_id,
                    duration_secs,
                    at: Utc::now(),
                });
            }
            Some(Advance::Exhausted) => {
                events.push(Event::FocusExhausted {
                    exercises_completed: self.exercises_completed,
                    at: Utc::now(),
                });
                self.switch_to_quiz(SwitchTrigger::ExercisesExhausted, events);
            }
            None => {}
        }
    }

    /// The single place `FocusExercise -> Quiz` happens.
    fn switch_to_quiz(&mut self, trigger: SwitchTrigger, events: &mut Vec<Event>) {
        if self.state != SessionState::FocusExercise {
            return;
        }
        self.state = SessionState::Quiz;
        self.switch_trigger = Some(trigger);
        if let Some(runner) = self.runner.as_mut() {
            runner.stop();
        }
        info!(session = %self.id, ?trigger, remaining = self.remaining_secs(), "switched to quiz");
        events.push(Event::PhaseSwitched {
            from: SessionState::FocusExercise,
            to: SessionState::Quiz,
            trigger,
            remaining_secs: self.remaining_secs(),
            at: Utc::now(),
        });
    }

    fn complete(&mut self, events: &mut Vec<Event>) {
        if self.state == SessionState::Completed {
            return;
        }
        self.state = SessionState::Completed;
        self.paused = false;
        self.stop_timers();
        self.finished_at = Some(Utc::now());
        info!(session = %self.id, "session completed");
        events.push(Event::SessionCompleted { at: Utc::now() });
    }

    fn stop_timers(&mut self) {
        self.master.stop();
        if let Some(runner) = self.runner.as_mut() {
            runner.stop();
        }
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ExerciseDefinition;

    fn controller() -> SessionController {
        SessionController::new(SessionOptions {
            motion_seed: Some(11),
            ..SessionOptions::default()
        })
    }

    fn long_exercises(secs: u64) -> ExerciseCatalogue {
        let mut c = ExerciseCatalogue::standard();
        for e in &mut c.exercises {
            e.duration_secs = secs;
        }
        c
    }

    fn run(c: &mut SessionController, ticks: u64) -> Vec<Event> {
        (0..ticks).flat_map(|_| c.tick()).collect()
    }

    fn count(events: &[Event], kind: &str) -> usize {
        events.iter().filter(|e| e.kind() == kind).count()
    }

    #[test]
    fn starts_in_not_started() {
        let c = controller();
        assert_eq!(c.state(), SessionState::NotStarted);
        assert_eq!(c.remaining_secs(), SESSION_TOTAL_SECS);
    }

    #[test]
    fn ticks_before_start_do_nothing() {
        let mut c = controller();
        assert!(run(&mut c, 10).is_empty());
        assert_eq!(c.remaining_secs(), SESSION_TOTAL_SECS);
    }

    #[test]
    fn start_enters_focus() {
        let mut c = controller();
        let events = c.start().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), "session_started");
        assert_eq!(c.state(), SessionState::FocusExercise);
        assert_eq!(c.current_exercise_index(), 0);
        assert_eq!(c.exercise_time_left(), 60);
    }

    #[test]
    fn second_start_is_rejected_and_harmless() {
        let mut c = controller();
        c.start().unwrap();
        c.tick();
        let err = c.start().unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                command: "start",
                state: SessionState::FocusExercise,
            }
        );
        c.tick();
        assert_eq!(c.remaining_secs(), SESSION_TOTAL_SECS - 2);
    }

    #[test]
    fn toggle_pause_rejected_outside_active_phases() {
        let mut c = controller();
        assert!(c.toggle_pause().is_err());
        assert!(!c.is_paused());
    }

    #[test]
    fn pause_halts_master_and_runner_together() {
        let mut c = controller();
        c.start().unwrap();
        run(&mut c, 10);
        assert_eq!(c.toggle_pause().unwrap().kind(), "session_paused");
        assert!(c.runner().unwrap().is_paused());
        run(&mut c, 30);
        assert_eq!(c.remaining_secs(), SESSION_TOTAL_SECS - 10);
        assert_eq!(c.exercise_time_left(), 50);
        assert_eq!(c.toggle_pause().unwrap().kind(), "session_resumed");
        assert!(!c.runner().unwrap().is_paused());
        c.tick();
        assert_eq!(c.remaining_secs(), SESSION_TOTAL_SECS - 11);
        assert_eq!(c.exercise_time_left(), 49);
    }

    #[test]
    fn runner_exhaustion_switches_to_quiz() {
        let mut c = controller();
        c.start().unwrap();
        let events = run(&mut c, 186);
        assert_eq!(c.state(), SessionState::Quiz);
        assert_eq!(c.switch_trigger(), Some(SwitchTrigger::ExercisesExhausted));
        assert_eq!(count(&events, "exercise_completed"), 3);
        assert_eq!(count(&events, "exercise_started"), 2);
        assert_eq!(count(&events, "focus_exhausted"), 1);
        assert_eq!(count(&events, "phase_switched"), 1);
        assert_eq!(c.remaining_secs(), SESSION_TOTAL_SECS - 186);
    }

    #[test]
    fn half_time_switches_when_exercises_are_slow() {
        let mut c = SessionController::new(SessionOptions {
            catalogue: long_exercises(1_000),
            motion_seed: Some(1),
            ..SessionOptions::default()
        });
        c.start().unwrap();
        let events = run(&mut c, 1_499);
        assert_eq!(c.state(), SessionState::FocusExercise);
        assert_eq!(count(&events, "phase_switched"), 0);
        let events = c.tick();
        assert_eq!(c.state(), SessionState::Quiz);
        assert_eq!(c.switch_trigger(), Some(SwitchTrigger::HalfTime));
        assert_eq!(count(&events, "phase_switched"), 1);
    }

    #[test]
    fn manual_exercise_completion_is_guarded() {
        let mut c = controller();
        assert!(c.on_exercise_complete().is_err());
        c.start().unwrap();
        assert_eq!(c.on_exercise_complete().unwrap()[0].kind(), "exercise_started");
        assert_eq!(c.on_exercise_complete().unwrap()[0].kind(), "exercise_started");
        let events = c.on_exercise_complete().unwrap();
        assert_eq!(count(&events, "phase_switched"), 1);
        assert_eq!(c.state(), SessionState::Quiz);
        assert!(c.on_exercise_complete().is_err());
    }

    #[test]
    fn end_stops_without_completing() {
        let mut c = controller();
        c.start().unwrap();
        run(&mut c, 5);
        let ev = c.end().unwrap();
        assert_eq!(ev.kind(), "session_ended");
        assert_eq!(c.state(), SessionState::FocusExercise);
        assert!(c.is_finished());
        assert!(run(&mut c, 100).is_empty());
        assert_eq!(c.remaining_secs(), SESSION_TOTAL_SECS - 5);
        assert_eq!(c.toggle_pause().unwrap_err(), TransitionError::SessionEnded);
        assert_eq!(c.end().unwrap_err(), TransitionError::SessionEnded);
        assert_eq!(c.summary().unwrap().outcome, SessionOutcome::Ended);
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut c = controller();
        let err = c.end().unwrap_err();
        assert!(matches!(err, TransitionError::InvalidTransition { command: "end", .. }));
        assert!(!c.is_ended());
        assert!(c.summary().is_none());
        // The session is still usable.
        assert!(c.start().is_ok());
    }

    #[test]
    fn end_after_completion_is_rejected() {
        let mut c = SessionController::new(SessionOptions {
            total_secs: 2,
            ..SessionOptions::default()
        });
        c.start().unwrap();
        run(&mut c, 2);
        assert_eq!(c.state(), SessionState::Completed);
        let finished_at = c.finished_at;

        let err = c.end().unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                command: "end",
                state: SessionState::Completed,
            }
        );
        assert!(!c.is_ended());
        assert!(!c.snapshot().is_ended);
        assert_eq!(c.finished_at, finished_at);
        assert_eq!(c.summary().unwrap().outcome, SessionOutcome::Completed);
    }

    #[test]
    fn exhaustion_completes_from_focus() {
        let mut c = SessionController::new(SessionOptions {
            total_secs: 1,
            ..SessionOptions::default()
        });
        c.start().unwrap();
        let events = c.tick();
        assert_eq!(c.state(), SessionState::Completed);
        assert_eq!(count(&events, "session_completed"), 1);
        assert_eq!(count(&events, "phase_switched"), 0);
    }

    #[test]
    fn empty_catalogue_goes_straight_to_quiz() {
        let mut c = SessionController::new(SessionOptions {
            catalogue: ExerciseCatalogue {
                exercises: Vec::<ExerciseDefinition>::new(),
            },
            ..SessionOptions::default()
        });
        let events = c.start().unwrap();
        assert_eq!(c.state(), SessionState::Quiz);
        assert_eq!(count(&events, "phase_switched"), 1);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut c = controller();
        c.start().unwrap();
        run(&mut c, 61);
        let snap = c.snapshot();
        assert_eq!(snap.state, SessionState::FocusExercise);
        assert_eq!(snap.remaining_display, "48:59");
        assert_eq!(snap.exercise_title.as_deref(), Some("Sustained Attention"));
        assert!(snap.exercise_completed);
        assert_eq!(snap.exercise_time_display, "0:00");
        assert_eq!(snap.time_band, TimeBand::Green);
        assert_eq!(snap.distractors.len(), 5);
    }

    #[test]
    fn summary_only_after_finish() {
        let mut c = controller();
        assert!(c.summary().is_none());
        c.start().unwrap();
        run(&mut c, 10);
        assert!(c.summary().is_none());
        run(&mut c, SESSION_TOTAL_SECS);
        let record = c.summary().unwrap();
        assert_eq!(record.outcome, SessionOutcome::Completed);
        assert_eq!(record.elapsed_secs, SESSION_TOTAL_SECS);
        assert_eq!(record.exercises_completed, 3);
        assert_eq!(record.id, c.id());
    }
}
