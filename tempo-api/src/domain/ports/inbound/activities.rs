use async_trait::async_trait;

use crate::domain::{
    civil_range::CivilRange,
    models::{
        Activity, ActivityChanges, ActivityDetails, ActivityId, NewActivity, Recurrence, TaskId,
        UserId,
    },
    ActivityError,
};

/// Inbound port for activity tracking.
///
/// Every operation is scoped to `owner`: activities belonging to tasks of
/// other users behave as if they did not exist.
#[async_trait]
pub trait ActivityService: Send + Sync + 'static {
    // ========================================================================
    // Civil-range queries
    // ========================================================================

    /// Activities whose zoned clock-in falls inside `range`, newest first,
    /// joined with their task and project names.
    async fn list_in_range(
        &self,
        owner: &UserId,
        range: &CivilRange,
        skip: u32,
        limit: u32,
    ) -> Result<Vec<ActivityDetails>, ActivityError>;

    /// Number of activities `list_in_range` would return without paging.
    /// Without a range, counts all of the owner's activities.
    async fn count_in_range(
        &self,
        owner: &UserId,
        range: Option<&CivilRange>,
    ) -> Result<u64, ActivityError>;

    // ========================================================================
    // CRUD
    // ========================================================================

    async fn list(
        &self,
        owner: &UserId,
        skip: u32,
        limit: u32,
    ) -> Result<Vec<Activity>, ActivityError>;

    async fn list_for_task(
        &self,
        owner: &UserId,
        task_id: &TaskId,
    ) -> Result<Vec<Activity>, ActivityError>;

    async fn get(&self, owner: &UserId, id: &ActivityId) -> Result<Activity, ActivityError>;

    /// Create an activity, plus its recurrences if any. Returns everything
    /// that was stored, original first.
    async fn create(
        &self,
        owner: &UserId,
        activity: NewActivity,
        recurrence: Option<Recurrence>,
    ) -> Result<Vec<Activity>, ActivityError>;

    async fn update(
        &self,
        owner: &UserId,
        id: &ActivityId,
        changes: &ActivityChanges,
    ) -> Result<Activity, ActivityError>;

    async fn delete(&self, owner: &UserId, id: &ActivityId) -> Result<(), ActivityError>;
}
