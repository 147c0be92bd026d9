use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{ActivityId, TaskDetails, TaskId};
use crate::domain::ActivityError;

/// Lifecycle state of a tracked activity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ActivityStatus {
    Planned,
    Doing,
    Done,
}

/// A stored clock-in/clock-out interval.
///
/// Both instants are naive and implicitly UTC, matching how they are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub id: ActivityId,
    pub task_id: TaskId,
    pub clock_in: NaiveDateTime,
    pub clock_out: Option<NaiveDateTime>,
    pub status: ActivityStatus,
    pub description: Option<String>,
}

impl Activity {
    pub fn new(
        id: impl Into<ActivityId>,
        task_id: impl Into<TaskId>,
        clock_in: NaiveDateTime,
        status: ActivityStatus,
    ) -> Self {
        Self {
            id: id.into(),
            task_id: task_id.into(),
            clock_in,
            clock_out: None,
            status,
            description: None,
        }
    }

    pub fn with_clock_out(mut self, clock_out: NaiveDateTime) -> Self {
        self.clock_out = Some(clock_out);
        self
    }

    #[cfg(test)]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Only finished (`DONE`, clocked out) activities contribute to reports.
    pub fn is_completed(&self) -> bool {
        self.status == ActivityStatus::Done && self.clock_out.is_some()
    }
}

/// An activity joined with the display metadata of its task and project.
#[derive(Debug, Clone)]
pub struct ActivityDetails {
    pub activity: Activity,
    pub task: Option<TaskDetails>,
}

/// Request to create an activity, already normalized to naive UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub task_id: TaskId,
    pub clock_in: NaiveDateTime,
    pub clock_out: Option<NaiveDateTime>,
    pub status: ActivityStatus,
    pub description: Option<String>,
}

impl NewActivity {
    /// Copy of this activity with both instants moved forward by `days`, or
    /// `None` if either would leave the calendar.
    pub fn shifted_by_days(&self, days: i64) -> Option<Self> {
        let offset = Duration::try_days(days)?;
        let clock_out = match self.clock_out {
            Some(out) => Some(out.checked_add_signed(offset)?),
            None => None,
        };

        Some(Self {
            clock_in: self.clock_in.checked_add_signed(offset)?,
            clock_out,
            ..self.clone()
        })
    }

    /// The activity followed by `recurrence.count` copies, each `days_interval`
    /// days after the previous one.
    pub fn with_recurrences(
        self,
        recurrence: Option<Recurrence>,
    ) -> Result<Vec<Self>, ActivityError> {
        let Some(recurrence) = recurrence else {
            return Ok(vec![self]);
        };

        let copies = (1..=i64::from(recurrence.count))
            .map(|i| {
                recurrence
                    .days_interval
                    .checked_mul(i)
                    .and_then(|days| self.shifted_by_days(days))
                    .ok_or_else(|| {
                        ActivityError::InvalidRecurrence(
                            "recurrence runs past the supported date range".to_string(),
                        )
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(std::iter::once(self).chain(copies).collect())
    }
}

/// Upper bound on copies created by a single recurring request.
pub const MAX_RECURRENCES: u32 = 366;

/// Fixed-offset repetition of a newly created activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    pub days_interval: i64,
    pub count: u32,
}

impl Recurrence {
    /// Build a recurrence from the loose request fields.
    ///
    /// Returns `None` when `is_recurring` is false; the interval and count are
    /// then ignored.
    pub fn from_parts(
        is_recurring: bool,
        days_interval: Option<i64>,
        count: Option<i64>,
    ) -> Result<Option<Self>, ActivityError> {
        if !is_recurring {
            return Ok(None);
        }

        let days_interval = match days_interval {
            Some(days) if days > 0 => days,
            _ => {
                return Err(ActivityError::InvalidRecurrence(
                    "days interval must be greater than 0".to_string(),
                ))
            }
        };

        let count = count
            .filter(|count| *count > 0)
            .and_then(|count| u32::try_from(count).ok())
            .ok_or_else(|| {
                ActivityError::InvalidRecurrence(
                    "recurrence count must be greater than 0".to_string(),
                )
            })?;
        if count > MAX_RECURRENCES {
            return Err(ActivityError::InvalidRecurrence(format!(
                "recurrence count must be at most {MAX_RECURRENCES}"
            )));
        }

        Ok(Some(Self {
            days_interval,
            count,
        }))
    }
}

/// Partial update of an activity. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityChanges {
    pub task_id: Option<TaskId>,
    pub clock_in: Option<NaiveDateTime>,
    pub clock_out: Option<NaiveDateTime>,
    pub status: Option<ActivityStatus>,
    pub description: Option<String>,
}

impl ActivityChanges {
    pub fn apply(&self, activity: &Activity) -> Activity {
        Activity {
            id: activity.id,
            task_id: self.task_id.unwrap_or(activity.task_id),
            clock_in: self.clock_in.unwrap_or(activity.clock_in),
            clock_out: self.clock_out.or(activity.clock_out),
            status: self.status.unwrap_or(activity.status),
            description: self
                .description
                .clone()
                .or_else(|| activity.description.clone()),
        }
    }
}
