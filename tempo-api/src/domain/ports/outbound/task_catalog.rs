use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{
    models::{TaskDetails, TaskId, UserId},
    ActivityError,
};

/// Outbound port for task and project metadata.
///
/// Tasks and projects are managed elsewhere; this service only reads names
/// and ownership.
#[async_trait]
pub trait TaskCatalog: Send + Sync + 'static {
    /// Details for the given tasks that belong to `owner`. Tasks that do not
    /// exist or belong to someone else are absent from the result.
    async fn task_details(
        &self,
        owner: &UserId,
        task_ids: &[TaskId],
    ) -> Result<HashMap<TaskId, TaskDetails>, ActivityError>;
}
