//! Folds clipped activities into per-project and per-task totals.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::domain::{
    clipper::ClippedActivity,
    models::{ProjectBucket, ProjectId, TaskBucket, TaskDetails, TaskId, TimeSpentReport},
};

/// Running totals for a single report. Hours stay unrounded until
/// [`ReportAggregator::finish`].
#[derive(Debug, Default)]
pub struct ReportAggregator {
    total_hours: f64,
    total_activities: u32,
    projects: BTreeMap<ProjectId, ProjectBucket>,
    tasks: BTreeMap<TaskId, TaskBucket>,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, clipped: &ClippedActivity, task: &TaskDetails) {
        if clipped.hours <= 0.0 {
            return;
        }

        self.total_hours += clipped.hours;
        self.total_activities += 1;

        let project = self
            .projects
            .entry(task.project_id)
            .or_insert_with(|| ProjectBucket {
                project_name: task.project_name.clone(),
                total_hours: 0.0,
                activity_count: 0,
            });
        project.total_hours += clipped.hours;
        project.activity_count += 1;

        let bucket = self.tasks.entry(task.task_id).or_insert_with(|| TaskBucket {
            task_name: task.task_name.clone(),
            project_id: task.project_id,
            project_name: task.project_name.clone(),
            total_hours: 0.0,
            activity_count: 0,
        });
        bucket.total_hours += clipped.hours;
        bucket.activity_count += 1;
    }

    pub fn finish(self, start_date: NaiveDate, end_date: NaiveDate) -> TimeSpentReport {
        TimeSpentReport {
            start_date,
            end_date,
            total_hours: round_hours(self.total_hours),
            total_activities: self.total_activities,
            projects: self
                .projects
                .into_iter()
                .map(|(id, bucket)| {
                    let total_hours = round_hours(bucket.total_hours);
                    (id, ProjectBucket { total_hours, ..bucket })
                })
                .collect(),
            tasks: self
                .tasks
                .into_iter()
                .map(|(id, bucket)| {
                    let total_hours = round_hours(bucket.total_hours);
                    (id, TaskBucket { total_hours, ..bucket })
                })
                .collect(),
        }
    }
}

/// Aggregate clipped activities, resolving each one's task through `tasks`.
///
/// Activities whose task is unknown to the catalog are left out of every
/// total.
pub fn aggregate(
    clipped: &[ClippedActivity],
    tasks: &HashMap<TaskId, TaskDetails>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> TimeSpentReport {
    let mut aggregator = ReportAggregator::new();

    for entry in clipped {
        match tasks.get(&entry.activity.task_id) {
            Some(task) => aggregator.add(entry, task),
            None => tracing::debug!(
                activity_id = %entry.activity.id,
                task_id = %entry.activity.task_id,
                "task not found, leaving activity out of report"
            ),
        }
    }

    aggregator.finish(start_date, end_date)
}

fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
