//! Error types

use thiserror::Error;

/// Precondition violations reported by the assignment engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignError {
    #[error("team count must be at least 1 (got {0})")]
    InvalidTeamCount(usize),

    #[error("roster is empty, nothing to assign")]
    EmptyRoster,
}

/// Errors raised while reading a roster source.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON roster: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while loading an assignment configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] AssignError),
}

/// An integer code that does not name a priority tier or position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid {kind} code: {code}")]
pub struct InvalidCode {
    pub kind: &'static str,
    pub code: i64,
}
