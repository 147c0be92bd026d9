use thiserror::Error;

use crate::domain::models::{ActivityId, TaskId};

/// Errors that can occur while tracking or reporting activities.
#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("invalid date format, expected YYYY-MM-DD: {0}")]
    InvalidDateFormat(String),
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
    #[error("start date must be before end date")]
    InvalidRange,
    #[error("invalid timestamp: {0}")]
    InvalidInstant(String),
    #[error("activity store unavailable: {0}")]
    StoreUnavailable(String),
    /// Never returned to callers; built only to log a skipped candidate.
    #[error("activity {id} could not be converted: {reason}")]
    MalformedCandidate { id: ActivityId, reason: String },
    #[error("activity not found: {0}")]
    ActivityNotFound(ActivityId),
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    #[error("you already have an active (DOING) activity, clock out before starting a new one")]
    AlreadyDoing,
    #[error("clock out time must be after clock in time")]
    ClockOutNotAfterClockIn,
    #[error("invalid recurrence: {0}")]
    InvalidRecurrence(String),
}

impl ActivityError {
    pub fn store(msg: impl Into<String>) -> Self {
        Self::StoreUnavailable(msg.into())
    }
}
