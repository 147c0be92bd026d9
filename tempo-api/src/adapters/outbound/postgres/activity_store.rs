//! PostgreSQL implementation of the ActivityRepository port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    civil_range::UtcWindow,
    models::{Activity, ActivityId, ActivityStatus, NewActivity, TaskId, UserId},
    ports::outbound::ActivityRepository,
    ActivityError,
};
use crate::repositories::{ActivityRepo, ActivityRepoImpl, DatabaseActivity, NewDatabaseActivity};

/// Adapter that implements ActivityRepository using PostgreSQL.
pub struct PostgresActivityAdapter<R = ActivityRepoImpl> {
    repo: Arc<R>,
}

impl<R> PostgresActivityAdapter<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: ActivityRepo + Send + Sync + 'static> ActivityRepository for PostgresActivityAdapter<R> {
    async fn started_within(
        &self,
        owner: &UserId,
        window: &UtcWindow,
    ) -> Result<Vec<Activity>, ActivityError> {
        let rows = self
            .repo
            .started_between(owner.as_i32(), &window.start, &window.end)
            .await?;

        rows_to_domain(rows)
    }

    async fn completed_overlapping(
        &self,
        owner: &UserId,
        window: &UtcWindow,
    ) -> Result<Vec<Activity>, ActivityError> {
        let rows = self
            .repo
            .done_overlapping(owner.as_i32(), &window.start, &window.end)
            .await?;

        rows_to_domain(rows)
    }

    async fn count(&self, owner: &UserId) -> Result<u64, ActivityError> {
        let count = self.repo.count_for_owner(owner.as_i32()).await?;
        Ok(count.max(0) as u64)
    }

    async fn list(
        &self,
        owner: &UserId,
        skip: u32,
        limit: u32,
    ) -> Result<Vec<Activity>, ActivityError> {
        let rows = self
            .repo
            .page_for_owner(owner.as_i32(), i64::from(skip), i64::from(limit))
            .await?;

        rows_to_domain(rows)
    }

    async fn list_for_task(
        &self,
        owner: &UserId,
        task_id: &TaskId,
    ) -> Result<Vec<Activity>, ActivityError> {
        let rows = self.repo.for_task(owner.as_i32(), task_id.as_i32()).await?;
        rows_to_domain(rows)
    }

    async fn get(
        &self,
        owner: &UserId,
        id: &ActivityId,
    ) -> Result<Option<Activity>, ActivityError> {
        self.repo
            .by_id(owner.as_i32(), id.as_i32())
            .await?
            .map(db_activity_to_domain)
            .transpose()
    }

    async fn doing(&self, owner: &UserId) -> Result<Vec<ActivityId>, ActivityError> {
        let ids = self.repo.doing_ids(owner.as_i32()).await?;
        Ok(ids.into_iter().map(ActivityId::new).collect())
    }

    async fn create(&self, activities: &[NewActivity]) -> Result<Vec<Activity>, ActivityError> {
        let rows: Vec<NewDatabaseActivity> = activities
            .iter()
            .map(|new| NewDatabaseActivity {
                task_id: new.task_id.as_i32(),
                clock_in: new.clock_in,
                clock_out: new.clock_out,
                status: new.status.to_string(),
                description: new.description.clone(),
            })
            .collect();

        let created = self.repo.insert_many(&rows).await?;
        rows_to_domain(created)
    }

    async fn update(&self, activity: &Activity) -> Result<(), ActivityError> {
        let row = DatabaseActivity {
            id: activity.id.as_i32(),
            task_id: activity.task_id.as_i32(),
            clock_in: activity.clock_in,
            clock_out: activity.clock_out,
            status: activity.status.to_string(),
            description: activity.description.clone(),
        };

        Ok(self.repo.update(&row).await?)
    }

    async fn delete(&self, owner: &UserId, id: &ActivityId) -> Result<bool, ActivityError> {
        Ok(self.repo.delete(owner.as_i32(), id.as_i32()).await?)
    }
}

fn rows_to_domain(rows: Vec<DatabaseActivity>) -> Result<Vec<Activity>, ActivityError> {
    rows.into_iter().map(db_activity_to_domain).collect()
}

fn db_activity_to_domain(row: DatabaseActivity) -> Result<Activity, ActivityError> {
    let status = row.status.parse::<ActivityStatus>().map_err(|_| {
        ActivityError::store(format!("activity {} has unknown status {:?}", row.id, row.status))
    })?;

    Ok(Activity {
        id: ActivityId::new(row.id),
        task_id: TaskId::new(row.task_id),
        clock_in: row.clock_in,
        clock_out: row.clock_out,
        status,
        description: row.description,
    })
}
