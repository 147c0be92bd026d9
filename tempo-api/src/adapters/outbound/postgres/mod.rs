mod activity_store;
mod task_catalog;
mod user_directory;

pub use activity_store::PostgresActivityAdapter;
pub use task_catalog::PostgresTaskCatalog;
pub use user_directory::PostgresUserDirectory;
