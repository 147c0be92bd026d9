use thiserror::Error;

use crate::domain::ActivityError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("row not found: {0}")]
    NotFound(String),
}

impl From<RepositoryError> for ActivityError {
    fn from(err: RepositoryError) -> Self {
        ActivityError::store(err.to_string())
    }
}
