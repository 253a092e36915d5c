//! Guided training session: focus exercises, then the quiz.
//!
//! - [`SessionController`]: synchronous state machine, one per session
//! - [`FocusRunner`]: exercise sequencing inside the focus phase
//! - [`SessionDriver`]: 1 Hz tokio tick source around a shared controller

mod controller;
mod driver;
mod exercise;
mod focus;
pub mod motion;
mod snapshot;
mod state;

pub use controller::{SessionController, SessionOptions, SESSION_TOTAL_SECS};
pub use driver::{SessionDriver, SharedController};
pub use exercise::{ExerciseCatalogue, ExerciseDefinition};
pub use focus::{Advance, ExerciseStage, FocusRunner, RunnerSignal, DWELL_SECS};
pub use snapshot::{SessionSnapshot, TimeBand};
pub use state::{SessionState, SwitchTrigger};
