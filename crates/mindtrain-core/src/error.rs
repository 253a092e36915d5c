//! Core error types for mindtrain-core.
//!
//! Every fallible operation in the library reports through one of the enums
//! below; [`CoreError`] wraps them all for callers that do not care which
//! layer failed.

use std::path::PathBuf;
use thiserror::Error;

use crate::session::SessionState;

/// Core error type for mindtrain-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Session command rejected by the state machine
    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Quiz flow errors
    #[error("Quiz error: {0}")]
    Quiz(#[from] QuizError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A session command that the current state does not allow.
///
/// Rejected commands leave the controller untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot {command} while session is {state}")]
    InvalidTransition {
        command: &'static str,
        state: SessionState,
    },

    /// The session was ended manually and accepts no further commands.
    #[error("session has been ended")]
    SessionEnded,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Could not locate the config directory
    #[error("Configuration directory unavailable: {0}")]
    NoDataDir(String),
}

/// Quiz flow errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("question {question} has already been answered")]
    AlreadyAnswered { question: usize },

    #[error("option {index} out of range (question has {len} options)")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("question {question} has not been answered yet")]
    NotAnswered { question: usize },

    #[error("quiz is already completed")]
    Completed,
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid month for the calendar view
    #[error("Invalid month {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
