//! Error type for fatal conditions.
//!
//! Only malformed input and invalid configuration fail a run. Resource
//! scarcity and placement infeasibility are reported in the result as
//! warnings and unscheduled entries, never as errors.

use std::fmt;

use crate::models::{CalendarConflict, SlotRangeError};
use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// A fatal timetabling error.
#[derive(Debug)]
pub enum TimetableError {
    /// The configuration is internally inconsistent.
    InvalidConfig(String),
    /// Input records failed validation; all problems are listed.
    Validation(Vec<ValidationError>),
    /// An input record could not be read.
    Parse { record: usize, message: String },
    /// A commit contradicted an earlier availability check.
    Conflict(String),
    /// Malformed JSON.
    Json(serde_json::Error),
    /// Reader or writer failure.
    Io(std::io::Error),
}

impl fmt::Display for TimetableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimetableError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            TimetableError::Validation(errors) => {
                write!(f, "{} input error(s)", errors.len())?;
                for e in errors {
                    write!(f, "; {}", e.message)?;
                }
                Ok(())
            }
            TimetableError::Parse { record, message } => {
                write!(f, "record {record}: {message}")
            }
            TimetableError::Conflict(msg) => write!(f, "placement conflict: {msg}"),
            TimetableError::Json(e) => write!(f, "json: {e}"),
            TimetableError::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for TimetableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TimetableError::Json(e) => Some(e),
            TimetableError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TimetableError {
    fn from(e: serde_json::Error) -> Self {
        TimetableError::Json(e)
    }
}

impl From<std::io::Error> for TimetableError {
    fn from(e: std::io::Error) -> Self {
        TimetableError::Io(e)
    }
}

impl From<Vec<ValidationError>> for TimetableError {
    fn from(errors: Vec<ValidationError>) -> Self {
        TimetableError::Validation(errors)
    }
}

impl From<CalendarConflict> for TimetableError {
    fn from(e: CalendarConflict) -> Self {
        TimetableError::Conflict(e.to_string())
    }
}

impl From<SlotRangeError> for TimetableError {
    fn from(e: SlotRangeError) -> Self {
        TimetableError::Conflict(e.to_string())
    }
}
