//! In-memory implementations of the outbound ports for testing.

use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, RwLock,
};

use async_trait::async_trait;

use super::{ActivityRepository, TaskCatalog, UserDirectory};
use crate::domain::{
    civil_range::UtcWindow,
    models::{Activity, ActivityId, ActivityStatus, NewActivity, TaskDetails, TaskId, User, UserId},
    ActivityError,
};

/// Mock activity store backed by a Vec.
///
/// Ownership goes through the task: an activity is visible to a user only if
/// its task was registered with [`MockActivityRepository::with_task_owner`].
#[derive(Clone, Default)]
pub struct MockActivityRepository {
    activities: Arc<RwLock<Vec<Activity>>>,
    task_owners: Arc<RwLock<HashMap<TaskId, UserId>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_task_owner(self, task_id: impl Into<TaskId>, owner: UserId) -> Self {
        self.task_owners
            .write()
            .unwrap()
            .insert(task_id.into(), owner);
        self
    }

    pub fn with_activities(self, activities: Vec<Activity>) -> Self {
        self.activities.write().unwrap().extend(activities);
        self
    }

    /// Make every call fail as if the database were down.
    pub fn unavailable(self) -> Self {
        self.unavailable.store(true, Ordering::SeqCst);
        self
    }

    /// Get all activities (for test assertions).
    pub fn all_activities(&self) -> Vec<Activity> {
        self.activities.read().unwrap().clone()
    }

    fn check_available(&self) -> Result<(), ActivityError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ActivityError::store("connection refused"));
        }
        Ok(())
    }

    fn owned_by(&self, owner: &UserId) -> Result<Vec<Activity>, ActivityError> {
        self.check_available()?;
        let owners = self.task_owners.read().unwrap();
        let mut owned: Vec<Activity> = self
            .activities
            .read()
            .unwrap()
            .iter()
            .filter(|a| owners.get(&a.task_id) == Some(owner))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.clock_in.cmp(&a.clock_in));
        Ok(owned)
    }
}

#[async_trait]
impl ActivityRepository for MockActivityRepository {
    async fn started_within(
        &self,
        owner: &UserId,
        window: &UtcWindow,
    ) -> Result<Vec<Activity>, ActivityError> {
        Ok(self
            .owned_by(owner)?
            .into_iter()
            .filter(|a| window.start <= a.clock_in && a.clock_in <= window.end)
            .collect())
    }

    async fn completed_overlapping(
        &self,
        owner: &UserId,
        window: &UtcWindow,
    ) -> Result<Vec<Activity>, ActivityError> {
        Ok(self
            .owned_by(owner)?
            .into_iter()
            .filter(|a| a.status == ActivityStatus::Done)
            .filter(|a| match a.clock_out {
                Some(clock_out) => a.clock_in <= window.end && clock_out >= window.start,
                None => false,
            })
            .collect())
    }

    async fn count(&self, owner: &UserId) -> Result<u64, ActivityError> {
        Ok(self.owned_by(owner)?.len() as u64)
    }

    async fn list(
        &self,
        owner: &UserId,
        skip: u32,
        limit: u32,
    ) -> Result<Vec<Activity>, ActivityError> {
        let mut owned = self.owned_by(owner)?;
        owned.sort_by_key(|a| a.id);
        Ok(owned
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn list_for_task(
        &self,
        owner: &UserId,
        task_id: &TaskId,
    ) -> Result<Vec<Activity>, ActivityError> {
        Ok(self
            .owned_by(owner)?
            .into_iter()
            .filter(|a| a.task_id == *task_id)
            .collect())
    }

    async fn get(
        &self,
        owner: &UserId,
        id: &ActivityId,
    ) -> Result<Option<Activity>, ActivityError> {
        Ok(self.owned_by(owner)?.into_iter().find(|a| a.id == *id))
    }

    async fn doing(&self, owner: &UserId) -> Result<Vec<ActivityId>, ActivityError> {
        Ok(self
            .owned_by(owner)?
            .into_iter()
            .filter(|a| a.status == ActivityStatus::Doing)
            .map(|a| a.id)
            .collect())
    }

    async fn create(&self, activities: &[NewActivity]) -> Result<Vec<Activity>, ActivityError> {
        self.check_available()?;
        let mut stored = self.activities.write().unwrap();
        let mut next_id = stored.iter().map(|a| a.id.as_i32()).max().unwrap_or(0);

        let created: Vec<Activity> = activities
            .iter()
            .map(|new| {
                next_id += 1;
                Activity {
                    id: ActivityId::new(next_id),
                    task_id: new.task_id,
                    clock_in: new.clock_in,
                    clock_out: new.clock_out,
                    status: new.status,
                    description: new.description.clone(),
                }
            })
            .collect();

        stored.extend(created.iter().cloned());
        Ok(created)
    }

    async fn update(&self, activity: &Activity) -> Result<(), ActivityError> {
        self.check_available()?;
        let mut stored = self.activities.write().unwrap();
        match stored.iter_mut().find(|a| a.id == activity.id) {
            Some(existing) => {
                *existing = activity.clone();
                Ok(())
            }
            None => Err(ActivityError::ActivityNotFound(activity.id)),
        }
    }

    async fn delete(&self, owner: &UserId, id: &ActivityId) -> Result<bool, ActivityError> {
        if self.get(owner, id).await?.is_none() {
            return Ok(false);
        }
        self.activities.write().unwrap().retain(|a| a.id != *id);
        Ok(true)
    }
}

/// Mock task catalog keyed by task id.
#[derive(Clone, Default)]
pub struct MockTaskCatalog {
    tasks: Arc<RwLock<HashMap<TaskId, (UserId, TaskDetails)>>>,
}

impl MockTaskCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_task(self, owner: UserId, task: TaskDetails) -> Self {
        self.tasks
            .write()
            .unwrap()
            .insert(task.task_id, (owner, task));
        self
    }
}

#[async_trait]
impl TaskCatalog for MockTaskCatalog {
    async fn task_details(
        &self,
        owner: &UserId,
        task_ids: &[TaskId],
    ) -> Result<HashMap<TaskId, TaskDetails>, ActivityError> {
        let tasks = self.tasks.read().unwrap();
        Ok(task_ids
            .iter()
            .filter_map(|id| tasks.get(id))
            .filter(|(task_owner, _)| task_owner == owner)
            .map(|(_, task)| (task.task_id, task.clone()))
            .collect())
    }
}

/// Mock user directory keyed by API key.
#[derive(Clone, Default)]
pub struct MockUserDirectory {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MockUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(self, api_key: impl Into<String>, user: User) -> Self {
        self.users.write().unwrap().insert(api_key.into(), user);
        self
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn find_by_api_key(&self, api_key: &str) -> Result<Option<User>, ActivityError> {
        Ok(self.users.read().unwrap().get(api_key).cloned())
    }
}
