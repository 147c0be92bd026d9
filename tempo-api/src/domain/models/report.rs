use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::{ProjectId, TaskId};

/// Hours and activity count accumulated for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectBucket {
    pub project_name: String,
    pub total_hours: f64,
    pub activity_count: u32,
}

/// Hours and activity count accumulated for one task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskBucket {
    pub task_name: String,
    pub project_id: ProjectId,
    pub project_name: String,
    pub total_hours: f64,
    pub activity_count: u32,
}

/// Time spent per project and task over a civil date range.
///
/// All hour values are rounded to two decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSpentReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_hours: f64,
    pub total_activities: u32,
    pub projects: BTreeMap<ProjectId, ProjectBucket>,
    pub tasks: BTreeMap<TaskId, TaskBucket>,
}
