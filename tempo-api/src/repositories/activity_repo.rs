use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;

use super::repo_error::RepositoryError;

/// Row access for `activities`. Ownership is resolved by joining `tasks`.
#[async_trait]
pub trait ActivityRepo {
    async fn started_between(
        &self,
        owner: i32,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<Vec<DatabaseActivity>, RepositoryError>;
    async fn done_overlapping(
        &self,
        owner: i32,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<Vec<DatabaseActivity>, RepositoryError>;
    async fn count_for_owner(&self, owner: i32) -> Result<i64, RepositoryError>;
    async fn page_for_owner(
        &self,
        owner: i32,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<DatabaseActivity>, RepositoryError>;
    async fn for_task(&self, owner: i32, task_id: i32)
        -> Result<Vec<DatabaseActivity>, RepositoryError>;
    async fn by_id(&self, owner: i32, id: i32) -> Result<Option<DatabaseActivity>, RepositoryError>;
    async fn doing_ids(&self, owner: i32) -> Result<Vec<i32>, RepositoryError>;
    async fn insert_many(
        &self,
        activities: &[NewDatabaseActivity],
    ) -> Result<Vec<DatabaseActivity>, RepositoryError>;
    async fn update(&self, activity: &DatabaseActivity) -> Result<(), RepositoryError>;
    async fn delete(&self, owner: i32, id: i32) -> Result<bool, RepositoryError>;
}

pub struct ActivityRepoImpl {
    pool: PgPool,
}

impl ActivityRepoImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DatabaseActivity {
    pub id: i32,
    pub task_id: i32,
    pub clock_in: NaiveDateTime,
    pub clock_out: Option<NaiveDateTime>,
    pub status: String,
    pub description: Option<String>,
}

pub struct NewDatabaseActivity {
    pub task_id: i32,
    pub clock_in: NaiveDateTime,
    pub clock_out: Option<NaiveDateTime>,
    pub status: String,
    pub description: Option<String>,
}

const SELECT_OWNED: &str = r#"
    SELECT a.id, a.task_id, a.clock_in, a.clock_out, a.status, a.description
    FROM activities a
    JOIN tasks t ON t.id = a.task_id
    WHERE t.owner = $1
"#;

#[async_trait]
impl ActivityRepo for ActivityRepoImpl {
    async fn started_between(
        &self,
        owner: i32,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<Vec<DatabaseActivity>, RepositoryError> {
        let query = format!(
            "{SELECT_OWNED} AND a.clock_in >= $2 AND a.clock_in <= $3 ORDER BY a.clock_in DESC"
        );
        let activities = sqlx::query_as::<_, DatabaseActivity>(&query)
            .bind(owner)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;

        Ok(activities)
    }

    async fn done_overlapping(
        &self,
        owner: i32,
        start: &NaiveDateTime,
        end: &NaiveDateTime,
    ) -> Result<Vec<DatabaseActivity>, RepositoryError> {
        let query = format!(
            "{SELECT_OWNED} AND a.status = 'DONE' AND a.clock_out IS NOT NULL \
             AND a.clock_in <= $3 AND a.clock_out >= $2 ORDER BY a.clock_in DESC"
        );
        let activities = sqlx::query_as::<_, DatabaseActivity>(&query)
            .bind(owner)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;

        Ok(activities)
    }

    async fn count_for_owner(&self, owner: i32) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM activities a
            JOIN tasks t ON t.id = a.task_id
            WHERE t.owner = $1
            "#,
        )
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn page_for_owner(
        &self,
        owner: i32,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<DatabaseActivity>, RepositoryError> {
        let query = format!("{SELECT_OWNED} ORDER BY a.id OFFSET $2 LIMIT $3");
        let activities = sqlx::query_as::<_, DatabaseActivity>(&query)
            .bind(owner)
            .bind(skip)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(activities)
    }

    async fn for_task(
        &self,
        owner: i32,
        task_id: i32,
    ) -> Result<Vec<DatabaseActivity>, RepositoryError> {
        let query = format!("{SELECT_OWNED} AND a.task_id = $2 ORDER BY a.clock_in DESC");
        let activities = sqlx::query_as::<_, DatabaseActivity>(&query)
            .bind(owner)
            .bind(task_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(activities)
    }

    async fn by_id(&self, owner: i32, id: i32) -> Result<Option<DatabaseActivity>, RepositoryError> {
        let query = format!("{SELECT_OWNED} AND a.id = $2");
        let activity = sqlx::query_as::<_, DatabaseActivity>(&query)
            .bind(owner)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(activity)
    }

    async fn doing_ids(&self, owner: i32) -> Result<Vec<i32>, RepositoryError> {
        let ids: Vec<i32> = sqlx::query_scalar(
            r#"
            SELECT a.id
            FROM activities a
            JOIN tasks t ON t.id = a.task_id
            WHERE t.owner = $1 AND a.status = 'DOING'
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn insert_many(
        &self,
        activities: &[NewDatabaseActivity],
    ) -> Result<Vec<DatabaseActivity>, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(activities.len());

        for activity in activities {
            let row = sqlx::query_as::<_, DatabaseActivity>(
                r#"
                INSERT INTO activities (task_id, clock_in, clock_out, status, description)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, task_id, clock_in, clock_out, status, description
                "#,
            )
            .bind(activity.task_id)
            .bind(activity.clock_in)
            .bind(activity.clock_out)
            .bind(&activity.status)
            .bind(&activity.description)
            .fetch_one(&mut *tx)
            .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn update(&self, activity: &DatabaseActivity) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE activities
            SET task_id = $2, clock_in = $3, clock_out = $4, status = $5, description = $6
            WHERE id = $1
            "#,
        )
        .bind(activity.id)
        .bind(activity.task_id)
        .bind(activity.clock_in)
        .bind(activity.clock_out)
        .bind(&activity.status)
        .bind(&activity.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("activity {}", activity.id)));
        }
        Ok(())
    }

    async fn delete(&self, owner: i32, id: i32) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM activities a
            USING tasks t
            WHERE t.id = a.task_id AND t.owner = $1 AND a.id = $2
            "#,
        )
        .bind(owner)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
