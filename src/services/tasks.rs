use std::sync::Arc;

use crate::error::AppError;
use crate::models::{Task, TaskInput};
use crate::repository::{NewTask, ProjectRepository, TaskRepository};

/// Task operations nested under a project.
///
/// Every operation first checks that the project exists and belongs to the
/// caller. When it does not, `list` answers with an empty collection, `create`
/// fails with `BadRequest("Project not found")` and everything else with
/// `NotFound`. A task is only reachable through the project it belongs to.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    projects: Arc<dyn ProjectRepository>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>, projects: Arc<dyn ProjectRepository>) -> Self {
        Self { tasks, projects }
    }

    async fn project_belongs_to(&self, project_id: i32, user_id: i32) -> Result<bool, AppError> {
        Ok(self
            .projects
            .find_by_id(project_id)
            .await?
            .map_or(false, |project| project.is_owned_by(user_id)))
    }

    /// The task `id`, provided the project is owned by `user_id` and the task
    /// actually lives in that project.
    async fn owned_task(&self, id: i32, project_id: i32, user_id: i32) -> Result<Task, AppError> {
        if !self.project_belongs_to(project_id, user_id).await? {
            return Err(not_found());
        }
        match self.tasks.find_by_id(id).await? {
            Some(task) if task.project_id == project_id => Ok(task),
            _ => Err(not_found()),
        }
    }

    pub async fn list(&self, project_id: i32, user_id: i32) -> Result<Vec<Task>, AppError> {
        if !self.project_belongs_to(project_id, user_id).await? {
            return Ok(Vec::new());
        }
        self.tasks.list_by_project(project_id).await
    }

    pub async fn get(&self, id: i32, project_id: i32, user_id: i32) -> Result<Task, AppError> {
        self.owned_task(id, project_id, user_id).await
    }

    pub async fn create(
        &self,
        input: TaskInput,
        project_id: i32,
        user_id: i32,
    ) -> Result<Task, AppError> {
        if !self.project_belongs_to(project_id, user_id).await? {
            return Err(AppError::BadRequest("Project not found".into()));
        }
        let task = self
            .tasks
            .create(NewTask {
                project_id,
                title: input.title,
                description: input.description,
                due_date: input.due_date,
            })
            .await?;
        log::info!("user {} created task {} in project {}", user_id, task.id, project_id);
        Ok(task)
    }

    /// Replaces title, description and due date. A missing due date clears it.
    pub async fn update(
        &self,
        id: i32,
        input: TaskInput,
        project_id: i32,
        user_id: i32,
    ) -> Result<Task, AppError> {
        let mut task = self.owned_task(id, project_id, user_id).await?;
        task.title = input.title;
        task.description = input.description;
        task.due_date = input.due_date;
        let updated = self.tasks.update(&task).await?;
        log::debug!("user {} updated task {}", user_id, id);
        Ok(updated)
    }

    /// Flips the completion flag.
    pub async fn toggle_complete(
        &self,
        id: i32,
        project_id: i32,
        user_id: i32,
    ) -> Result<Task, AppError> {
        let mut task = self.owned_task(id, project_id, user_id).await?;
        task.is_completed = !task.is_completed;
        let updated = self.tasks.update(&task).await?;
        log::debug!(
            "user {} marked task {} as {}",
            user_id,
            id,
            if updated.is_completed { "completed" } else { "open" }
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: i32, project_id: i32, user_id: i32) -> Result<(), AppError> {
        self.owned_task(id, project_id, user_id).await?;
        self.tasks.delete(id).await.map_err(|e| match e {
            AppError::NotFound(_) => not_found(),
            other => other,
        })?;
        log::info!("user {} deleted task {}", user_id, id);
        Ok(())
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Task not found".into())
}
