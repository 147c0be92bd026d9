//! Activity store port (outbound).
//!
//! Defines the interface for reading and writing stored activities. Every
//! query is scoped to activities whose task belongs to `owner`.

use async_trait::async_trait;

use crate::domain::{
    civil_range::UtcWindow,
    models::{Activity, ActivityId, NewActivity, TaskId, UserId},
    ActivityError,
};

/// Outbound port for activity persistence.
///
/// Instants are naive UTC on both sides of this trait.
#[async_trait]
pub trait ActivityRepository: Send + Sync + 'static {
    /// Activities whose clock-in lies within `window` (inclusive), newest first.
    async fn started_within(
        &self,
        owner: &UserId,
        window: &UtcWindow,
    ) -> Result<Vec<Activity>, ActivityError>;

    /// `DONE` activities with a clock-out whose span touches `window`,
    /// newest first.
    async fn completed_overlapping(
        &self,
        owner: &UserId,
        window: &UtcWindow,
    ) -> Result<Vec<Activity>, ActivityError>;

    /// Total number of activities of the owner.
    async fn count(&self, owner: &UserId) -> Result<u64, ActivityError>;

    /// A page of the owner's activities in storage order.
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

    async fn get(&self, owner: &UserId, id: &ActivityId)
        -> Result<Option<Activity>, ActivityError>;

    /// Ids of the owner's activities currently in `DOING`.
    async fn doing(&self, owner: &UserId) -> Result<Vec<ActivityId>, ActivityError>;

    /// Insert all activities atomically and return them with their ids.
    async fn create(&self, activities: &[NewActivity]) -> Result<Vec<Activity>, ActivityError>;

    /// Overwrite a stored activity.
    async fn update(&self, activity: &Activity) -> Result<(), ActivityError>;

    /// Returns `false` if no such activity belongs to the owner.
    async fn delete(&self, owner: &UserId, id: &ActivityId) -> Result<bool, ActivityError>;
}
