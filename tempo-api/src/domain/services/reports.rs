use std::sync::Arc;

use async_trait::async_trait;
use itertools::Itertools;

use crate::domain::{
    aggregator,
    civil_range::CivilRange,
    clipper,
    models::{TaskId, TimeSpentReport, UserId},
    overlap::{Membership, OverlapFilter},
    ports::{
        inbound::ReportService,
        outbound::{ActivityRepository, TaskCatalog},
    },
    ActivityError,
};

/// Implementation of the [`ReportService`] inbound port.
///
/// Pipeline: fetch candidates in the widened UTC window, keep those matching
/// `membership`, clip each to the range, then aggregate per project and task.
pub struct ReportServiceImpl<R, C> {
    activities: Arc<R>,
    tasks: Arc<C>,
    membership: Membership,
}

impl<R, C> ReportServiceImpl<R, C> {
    pub fn new(activities: Arc<R>, tasks: Arc<C>) -> Self {
        Self {
            activities,
            tasks,
            membership: Membership::Overlap,
        }
    }

    pub fn with_membership(mut self, membership: Membership) -> Self {
        self.membership = membership;
        self
    }
}

#[async_trait]
impl<R: ActivityRepository, C: TaskCatalog> ReportService for ReportServiceImpl<R, C> {
    async fn time_spent(
        &self,
        owner: &UserId,
        range: &CivilRange,
    ) -> Result<TimeSpentReport, ActivityError> {
        let window = range.query_window();
        let candidates = match self.membership {
            Membership::Overlap => self.activities.completed_overlapping(owner, &window).await?,
            Membership::StartInstant => self.activities.started_within(owner, &window).await?,
        };

        let completed = OverlapFilter::new(range, self.membership)
            .filter(candidates)
            .into_iter()
            .filter(|activity| activity.is_completed())
            .collect();
        let clipped = clipper::clip_all(completed, range);

        let task_ids: Vec<TaskId> = clipped.iter().map(|c| c.activity.task_id).unique().collect();
        let tasks = self.tasks.task_details(owner, &task_ids).await?;

        let report = aggregator::aggregate(&clipped, &tasks, range.start_date, range.end_date);

        tracing::debug!(
            user_id = %owner,
            zone = range.zone.name(),
            total_hours = report.total_hours,
            total_activities = report.total_activities,
            "built time-spent report"
        );

        Ok(report)
    }
}
