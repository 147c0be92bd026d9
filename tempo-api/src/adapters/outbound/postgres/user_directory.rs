//! PostgreSQL implementation of the UserDirectory port.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    models::{User, UserId},
    ports::outbound::UserDirectory,
    ActivityError,
};
use crate::repositories::{UserRepository, UserRepositoryImpl};

pub struct PostgresUserDirectory<R = UserRepositoryImpl> {
    repo: Arc<R>,
}

impl<R> PostgresUserDirectory<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: UserRepository + Send + Sync + 'static> UserDirectory for PostgresUserDirectory<R> {
    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<User>, ActivityError> {
        let user = self.repo.user_by_api_key(api_key).await?;

        Ok(user.map(|row| User {
            id: UserId::new(row.id),
            username: row.username,
            display_name: row.display_name,
            timezone: row.timezone,
        }))
    }
}
