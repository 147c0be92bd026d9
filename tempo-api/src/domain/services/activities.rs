use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use itertools::Itertools;

use crate::domain::{
    civil_range::CivilRange,
    models::{
        Activity, ActivityChanges, ActivityDetails, ActivityId, ActivityStatus, NewActivity,
        Recurrence, TaskId, UserId,
    },
    overlap::{Membership, OverlapFilter},
    ports::{
        inbound::ActivityService,
        outbound::{ActivityRepository, TaskCatalog},
    },
    zone, ActivityError,
};

/// Implementation of the [`ActivityService`] inbound port.
///
/// Range queries match on the zoned clock-in only, so an activity that started
/// the evening before a range is not listed even if it ran into it.
pub struct ActivityServiceImpl<R, C> {
    activities: Arc<R>,
    tasks: Arc<C>,
}

impl<R, C> ActivityServiceImpl<R, C> {
    pub fn new(activities: Arc<R>, tasks: Arc<C>) -> Self {
        Self { activities, tasks }
    }
}

impl<R: ActivityRepository, C: TaskCatalog> ActivityServiceImpl<R, C> {
    async fn in_range(
        &self,
        owner: &UserId,
        range: &CivilRange,
    ) -> Result<Vec<Activity>, ActivityError> {
        let candidates = self
            .activities
            .started_within(owner, &range.query_window())
            .await?;

        Ok(OverlapFilter::new(range, Membership::StartInstant).filter(candidates))
    }

    async fn ensure_task_owned(&self, owner: &UserId, task_id: TaskId) -> Result<(), ActivityError> {
        let found = self.tasks.task_details(owner, &[task_id]).await?;
        if found.contains_key(&task_id) {
            Ok(())
        } else {
            Err(ActivityError::TaskNotFound(task_id))
        }
    }

    /// Fails if the owner has a `DOING` activity other than `except`.
    async fn ensure_nothing_doing(
        &self,
        owner: &UserId,
        except: Option<ActivityId>,
    ) -> Result<(), ActivityError> {
        let doing = self.activities.doing(owner).await?;
        if doing.iter().any(|id| Some(*id) != except) {
            return Err(ActivityError::AlreadyDoing);
        }
        Ok(())
    }
}

/// Whether both instants can be shown in the range's zone. Applied before
/// paging.
fn renders_in(activity: &Activity, range: &CivilRange) -> bool {
    let instants = std::iter::once(activity.clock_in).chain(activity.clock_out);
    match instants
        .map(|instant| zone::to_zone(instant, range.zone))
        .find_map(Result::err)
    {
        Some(e) => {
            tracing::warn!(activity_id = %activity.id, "leaving activity out of listing: {}", e);
            false
        }
        None => true,
    }
}

fn ensure_ordered(
    clock_in: NaiveDateTime,
    clock_out: Option<NaiveDateTime>,
) -> Result<(), ActivityError> {
    match clock_out {
        Some(clock_out) if clock_out <= clock_in => Err(ActivityError::ClockOutNotAfterClockIn),
        _ => Ok(()),
    }
}

#[async_trait]
impl<R: ActivityRepository, C: TaskCatalog> ActivityService for ActivityServiceImpl<R, C> {
    async fn list_in_range(
        &self,
        owner: &UserId,
        range: &CivilRange,
        skip: u32,
        limit: u32,
    ) -> Result<Vec<ActivityDetails>, ActivityError> {
        let mut matched: Vec<Activity> = self
            .in_range(owner, range)
            .await?
            .into_iter()
            .filter(|activity| renders_in(activity, range))
            .collect();
        matched.sort_by(|a, b| b.clock_in.cmp(&a.clock_in).then(b.id.cmp(&a.id)));

        let page: Vec<Activity> = matched
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect();

        let task_ids: Vec<TaskId> = page.iter().map(|a| a.task_id).unique().collect();
        let tasks = self.tasks.task_details(owner, &task_ids).await?;

        tracing::debug!(
            user_id = %owner,
            activities = page.len(),
            tasks = tasks.len(),
            "listing activities in range"
        );

        Ok(page
            .into_iter()
            .map(|activity| {
                let task = tasks.get(&activity.task_id).cloned();
                ActivityDetails { activity, task }
            })
            .collect())
    }

    async fn count_in_range(
        &self,
        owner: &UserId,
        range: Option<&CivilRange>,
    ) -> Result<u64, ActivityError> {
        match range {
            Some(range) => Ok(self.in_range(owner, range).await?.len() as u64),
            None => self.activities.count(owner).await,
        }
    }

    async fn list(
        &self,
        owner: &UserId,
        skip: u32,
        limit: u32,
    ) -> Result<Vec<Activity>, ActivityError> {
        self.activities.list(owner, skip, limit).await
    }

    async fn list_for_task(
        &self,
        owner: &UserId,
        task_id: &TaskId,
    ) -> Result<Vec<Activity>, ActivityError> {
        self.ensure_task_owned(owner, *task_id).await?;
        self.activities.list_for_task(owner, task_id).await
    }

    async fn get(&self, owner: &UserId, id: &ActivityId) -> Result<Activity, ActivityError> {
        self.activities
            .get(owner, id)
            .await?
            .ok_or(ActivityError::ActivityNotFound(*id))
    }

    async fn create(
        &self,
        owner: &UserId,
        activity: NewActivity,
        recurrence: Option<Recurrence>,
    ) -> Result<Vec<Activity>, ActivityError> {
        self.ensure_task_owned(owner, activity.task_id).await?;

        if activity.status == ActivityStatus::Doing {
            if recurrence.is_some() {
                return Err(ActivityError::InvalidRecurrence(
                    "a DOING activity cannot recur".to_string(),
                ));
            }
            self.ensure_nothing_doing(owner, None).await?;
        }

        ensure_ordered(activity.clock_in, activity.clock_out)?;

        let batch = activity.with_recurrences(recurrence)?;
        let created = self.activities.create(&batch).await?;

        tracing::info!(user_id = %owner, created = created.len(), "created activities");
        Ok(created)
    }

    async fn update(
        &self,
        owner: &UserId,
        id: &ActivityId,
        changes: &ActivityChanges,
    ) -> Result<Activity, ActivityError> {
        let existing = self.get(owner, id).await?;

        if changes.status == Some(ActivityStatus::Doing) {
            self.ensure_nothing_doing(owner, Some(*id)).await?;
        }
        if let Some(task_id) = changes.task_id {
            self.ensure_task_owned(owner, task_id).await?;
        }

        let updated = changes.apply(&existing);
        ensure_ordered(updated.clock_in, updated.clock_out)?;

        self.activities.update(&updated).await?;
        Ok(updated)
    }

    async fn delete(&self, owner: &UserId, id: &ActivityId) -> Result<(), ActivityError> {
        if self.activities.delete(owner, id).await? {
            tracing::info!(user_id = %owner, activity_id = %id, "deleted activity");
            Ok(())
        } else {
            Err(ActivityError::ActivityNotFound(*id))
        }
    }
}
