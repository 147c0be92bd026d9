use super::{ProjectId, TaskId};

/// Display metadata for a task and the project it belongs to.
///
/// Resolved from the task catalog; tasks and projects are managed elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    pub task_id: TaskId,
    pub task_name: String,
    pub project_id: ProjectId,
    pub project_name: String,
}

impl TaskDetails {
    pub fn new(
        task_id: impl Into<TaskId>,
        task_name: impl Into<String>,
        project_id: impl Into<ProjectId>,
        project_name: impl Into<String>,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            task_name: task_name.into(),
            project_id: project_id.into(),
            project_name: project_name.into(),
        }
    }
}
