mod activity_repo;
mod repo_error;
mod task_repo;
mod user_repo;

pub use activity_repo::*;
pub use repo_error::RepositoryError;
pub use task_repo::*;
pub use user_repo::*;
