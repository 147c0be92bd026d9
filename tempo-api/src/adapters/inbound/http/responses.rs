//! HTTP response types for the activity and report endpoints.
//!
//! Instants are rendered as RFC 3339 in the zone the request resolved to.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;

use crate::domain::{
    models::{
        Activity, ActivityDetails, ActivityStatus, ProjectBucket, ProjectId, TaskBucket, TaskId,
        TimeSpentReport,
    },
    zone::{self, ConversionError},
};

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub id: i32,
    pub clock_in: DateTime<FixedOffset>,
    pub clock_out: Option<DateTime<FixedOffset>>,
    pub task_id: i32,
    pub status: ActivityStatus,
    pub description: Option<String>,
}

impl ActivityResponse {
    pub fn in_zone(activity: Activity, tz: Tz) -> Result<Self, ConversionError> {
        Ok(Self {
            id: activity.id.as_i32(),
            clock_in: zone::to_fixed_offset(activity.clock_in, tz)?,
            clock_out: activity
                .clock_out
                .map(|clock_out| zone::to_fixed_offset(clock_out, tz))
                .transpose()?,
            task_id: activity.task_id.as_i32(),
            status: activity.status,
            description: activity.description,
        })
    }
}

/// An activity with the names of its task and project.
///
/// The task fields are null when the task could not be resolved.
#[derive(Debug, Serialize)]
pub struct ActivityDetailsResponse {
    #[serde(flatten)]
    pub activity: ActivityResponse,
    pub task_name: Option<String>,
    pub project_id: Option<i32>,
    pub project_name: Option<String>,
}

impl ActivityDetailsResponse {
    pub fn in_zone(details: ActivityDetails, tz: Tz) -> Result<Self, ConversionError> {
        let activity = ActivityResponse::in_zone(details.activity, tz)?;
        let (task_name, project_id, project_name) = match details.task {
            Some(task) => (
                Some(task.task_name),
                Some(task.project_id.as_i32()),
                Some(task.project_name),
            ),
            None => (None, None, None),
        };

        Ok(Self {
            activity,
            task_name,
            project_id,
            project_name,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectDataResponse {
    pub total_hours: f64,
    pub activity_count: u32,
    pub project_name: String,
}

#[derive(Debug, Serialize)]
pub struct TaskDataResponse {
    pub total_hours: f64,
    pub activity_count: u32,
    pub task_name: String,
    pub project_id: i32,
    pub project_name: String,
}

/// Report keyed by project and task id. JSON object keys are the ids as strings.
#[derive(Debug, Serialize)]
pub struct TimeSpentReportResponse {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_hours: f64,
    pub total_activities: u32,
    pub project_data: BTreeMap<ProjectId, ProjectDataResponse>,
    pub task_data: BTreeMap<TaskId, TaskDataResponse>,
}

impl From<ProjectBucket> for ProjectDataResponse {
    fn from(bucket: ProjectBucket) -> Self {
        Self {
            total_hours: bucket.total_hours,
            activity_count: bucket.activity_count,
            project_name: bucket.project_name,
        }
    }
}

impl From<TaskBucket> for TaskDataResponse {
    fn from(bucket: TaskBucket) -> Self {
        Self {
            total_hours: bucket.total_hours,
            activity_count: bucket.activity_count,
            task_name: bucket.task_name,
            project_id: bucket.project_id.as_i32(),
            project_name: bucket.project_name,
        }
    }
}

impl From<TimeSpentReport> for TimeSpentReportResponse {
    fn from(report: TimeSpentReport) -> Self {
        Self {
            start_date: report.start_date,
            end_date: report.end_date,
            total_hours: report.total_hours,
            total_activities: report.total_activities,
            project_data: report
                .projects
                .into_iter()
                .map(|(id, bucket)| (id, bucket.into()))
                .collect(),
            task_data: report
                .tasks
                .into_iter()
                .map(|(id, bucket)| (id, bucket.into()))
                .collect(),
        }
    }
}
