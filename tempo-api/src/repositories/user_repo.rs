use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_error::RepositoryError;

#[async_trait]
pub trait UserRepository {
    /// The owner of `api_key`, unless the key is unknown or expired.
    async fn user_by_api_key(&self, api_key: &str) -> Result<Option<DatabaseUser>, RepositoryError>;
}

pub struct UserRepositoryImpl {
    pool: PgPool,
}

impl UserRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DatabaseUser {
    pub id: i32,
    pub username: String,
    pub display_name: String,
    pub timezone: Option<String>,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn user_by_api_key(&self, api_key: &str) -> Result<Option<DatabaseUser>, RepositoryError> {
        let user = sqlx::query_as::<_, DatabaseUser>(
            r#"
            SELECT u.id, u.username, u.display_name, u.timezone
            FROM api_keys k
            JOIN users u ON u.id = k.owner
            WHERE k.key = $1 AND k.expires_at > (NOW() AT TIME ZONE 'UTC')
            "#,
        )
        .bind(api_key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
