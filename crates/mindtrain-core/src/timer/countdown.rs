//! Countdown primitive.
//!
//! A countdown holds whole seconds and never owns a thread or a timer handle.
//! The caller delivers one `tick()` per elapsed second; the countdown decides
//! whether that tick counts.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!            |           |
//!            v           v
//!        Finished     Stopped
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownState {
    Idle,
    Running,
    Paused,
    /// Reached zero. Terminal until `reseed()`.
    Finished,
    /// Cancelled by `stop()`. Terminal until `reseed()`.
    Stopped,
}

/// Result of delivering one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The countdown was not running; nothing changed.
    Idle,
    /// One second was taken off; carries the new remaining value.
    Decremented(u64),
    /// The countdown reached zero on this tick. Reported exactly once.
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    total_secs: u64,
    remaining_secs: u64,
    state: CountdownState,
}

impl Countdown {
    pub fn new(total_secs: u64) -> Self {
        Self {
            total_secs,
            remaining_secs: total_secs,
            state: CountdownState::Idle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.total_secs - self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == CountdownState::Paused
    }

    pub fn is_finished(&self) -> bool {
        self.state == CountdownState::Finished
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting. Returns `false` without side effects unless idle, so a
    /// repeated start can never double the decrement rate.
    pub fn start(&mut self) -> bool {
        if self.state != CountdownState::Idle {
            return false;
        }
        if self.remaining_secs == 0 {
            self.state = CountdownState::Finished;
            return false;
        }
        self.state = CountdownState::Running;
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state != CountdownState::Running {
            return false;
        }
        self.state = CountdownState::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != CountdownState::Paused {
            return false;
        }
        self.state = CountdownState::Running;
        true
    }

    /// Cancel future decrements. Calling it again is a no-op.
    pub fn stop(&mut self) {
        match self.state {
            CountdownState::Finished | CountdownState::Stopped => {}
            _ => self.state = CountdownState::Stopped,
        }
    }

    /// Rearm with a new duration, back in `Idle`.
    pub fn reseed(&mut self, total_secs: u64) {
        self.total_secs = total_secs;
        self.remaining_secs = total_secs;
        self.state = CountdownState::Idle;
    }

    pub fn tick(&mut self) -> Tick {
        if self.state != CountdownState::Running {
            return Tick::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        debug_assert!(self.remaining_secs <= self.total_secs);
        if self.remaining_secs == 0 {
            self.state = CountdownState::Finished;
            return Tick::Finished;
        }
        Tick::Decremented(self.remaining_secs)
    }
}

/// `MM:SS`, zero-padded minutes. Used for the session clock.
pub fn format_mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `M:SS`, unpadded minutes. Used for the per-exercise clock.
pub fn format_m_ss(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_finish_once() {
        let mut cd = Countdown::new(3);
        assert!(cd.start());
        assert_eq!(cd.tick(), Tick::Decremented(2));
        assert_eq!(cd.tick(), Tick::Decremented(1));
        assert_eq!(cd.tick(), Tick::Finished);
        assert_eq!(cd.tick(), Tick::Idle);
        assert_eq!(cd.tick(), Tick::Idle);
        assert_eq!(cd.remaining_secs(), 0);
        assert!(cd.is_finished());
    }

    #[test]
    fn start_is_idempotent() {
        let mut cd = Countdown::new(10);
        assert!(cd.start());
        assert!(!cd.start());
        cd.tick();
        assert_eq!(cd.remaining_secs(), 9);
    }

    #[test]
    fn start_does_not_resume_a_paused_countdown() {
        let mut cd = Countdown::new(10);
        cd.start();
        cd.pause();
        assert!(!cd.start());
        assert!(cd.is_paused());
    }

    #[test]
    fn pause_holds_value() {
        let mut cd = Countdown::new(10);
        cd.start();
        cd.tick();
        assert!(cd.pause());
        for _ in 0..5 {
            assert_eq!(cd.tick(), Tick::Idle);
        }
        assert_eq!(cd.remaining_secs(), 9);
        assert!(cd.resume());
        assert_eq!(cd.tick(), Tick::Decremented(8));
    }

    #[test]
    fn stop_is_idempotent_and_final() {
        let mut cd = Countdown::new(10);
        cd.start();
        cd.stop();
        cd.stop();
        assert_eq!(cd.state(), CountdownState::Stopped);
        assert!(!cd.resume());
        assert!(!cd.start());
        assert_eq!(cd.tick(), Tick::Idle);
    }

    #[test]
    fn stop_keeps_finished_state() {
        let mut cd = Countdown::new(1);
        cd.start();
        assert_eq!(cd.tick(), Tick::Finished);
        cd.stop();
        assert!(cd.is_finished());
    }

    #[test]
    fn reseed_rearms() {
        let mut cd = Countdown::new(1);
        cd.start();
        cd.tick();
        cd.reseed(60);
        assert_eq!(cd.state(), CountdownState::Idle);
        assert_eq!(cd.remaining_secs(), 60);
        assert!(cd.start());
    }

    #[test]
    fn zero_length_countdown_never_runs() {
        let mut cd = Countdown::new(0);
        assert!(!cd.start());
        assert!(cd.is_finished());
        assert_eq!(cd.tick(), Tick::Idle);
    }

    #[test]
    fn formats() {
        assert_eq!(format_mm_ss(3000), "50:00");
        assert_eq!(format_mm_ss(1500), "25:00");
        assert_eq!(format_mm_ss(61), "01:01");
        assert_eq!(format_m_ss(60), "1:00");
        assert_eq!(format_m_ss(9), "0:09");
    }
}
