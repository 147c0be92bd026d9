mod activity_repository;
#[cfg(test)]
mod mock;
mod task_catalog;
mod user_directory;

pub use activity_repository::*;
#[cfg(test)]
pub use mock::*;
pub use task_catalog::*;
pub use user_directory::*;
