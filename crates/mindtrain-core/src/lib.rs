//! # mindtrain Core Library
//!
//! This library provides the core logic for mindtrain, a guided attention
//! training program. One session lasts 50 minutes: a run of timed focus
//! exercises, then a short knowledge quiz. The CLI binary is a thin layer
//! over the same library.
//!
//! ## Architecture
//!
//! - **Timer**: A whole-second countdown that requires the caller to invoke
//!   `tick()`; it owns no threads
//! - **Session**: The controller state machine, the focus exercise runner and
//!   a tokio driver that supplies ticks in real time
//! - **Quiz**: Linear question flow with its own score
//! - **Progress**: In-memory history, streak calendar and weekly statistics
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`SessionController`]: Core session state machine
//! - [`SessionDriver`]: Real-time tick source
//! - [`QuizRunner`]: Quiz flow
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod progress;
pub mod quiz;
pub mod session;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, QuizError, TransitionError, ValidationError};
pub use events::{Event, Toast};
pub use progress::{InMemoryHistory, MonthView, SessionRecord, SessionRecorder, WeeklyStats};
pub use quiz::{QuizProgress, QuizQuestion, QuizRunner};
pub use session::{
    ExerciseCatalogue, ExerciseDefinition, SessionController, SessionDriver, SessionOptions,
    SessionSnapshot, SessionState, SwitchTrigger, SESSION_TOTAL_SECS,
};
pub use storage::Config;
pub use timer::{Countdown, CountdownState, Tick};
