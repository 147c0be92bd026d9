//! PostgreSQL implementation of the TaskCatalog port.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;

use crate::domain::{
    models::{TaskDetails, TaskId, UserId},
    ports::outbound::TaskCatalog,
    ActivityError,
};
use crate::repositories::{TaskRepo, TaskRepoImpl};

pub struct PostgresTaskCatalog<R = TaskRepoImpl> {
    repo: Arc<R>,
}

impl<R> PostgresTaskCatalog<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: TaskRepo + Send + Sync + 'static> TaskCatalog for PostgresTaskCatalog<R> {
    async fn task_details(
        &self,
        owner: &UserId,
        task_ids: &[TaskId],
    ) -> Result<HashMap<TaskId, TaskDetails>, ActivityError> {
        let ids: Vec<i32> = task_ids.iter().map(TaskId::as_i32).collect();
        let rows = self.repo.owned_with_projects(owner.as_i32(), &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let task = TaskDetails::new(row.task_id, row.task_name, row.project_id, row.project_name);
                (task.task_id, task)
            })
            .collect())
    }
}
