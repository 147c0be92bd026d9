use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_error::RepositoryError;

#[async_trait]
pub trait TaskRepo {
    /// Tasks in `ids` owned by `owner`, joined with their project.
    async fn owned_with_projects(
        &self,
        owner: i32,
        ids: &[i32],
    ) -> Result<Vec<DatabaseTaskDetails>, RepositoryError>;
}

pub struct TaskRepoImpl {
    pool: PgPool,
}

impl TaskRepoImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DatabaseTaskDetails {
    pub task_id: i32,
    pub task_name: String,
    pub project_id: i32,
    pub project_name: String,
}

#[async_trait]
impl TaskRepo for TaskRepoImpl {
    async fn owned_with_projects(
        &self,
        owner: i32,
        ids: &[i32],
    ) -> Result<Vec<DatabaseTaskDetails>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let tasks = sqlx::query_as::<_, DatabaseTaskDetails>(
            r#"
            SELECT t.id AS task_id, t.title AS task_name, p.id AS project_id, p.name AS project_name
            FROM tasks t
            JOIN projects p ON p.id = t.proj_id
            WHERE t.owner = $1 AND t.id = ANY($2)
            "#,
        )
        .bind(owner)
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }
}
