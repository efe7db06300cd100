use std::sync::Arc;

use crate::error::AppError;
use crate::models::{Project, ProjectInput};
use crate::repository::ProjectRepository;

/// Owner-scoped project operations.
///
/// A project owned by someone else is reported exactly like a missing one.
#[derive(Clone)]
pub struct ProjectService {
    projects: Arc<dyn ProjectRepository>,
}

impl ProjectService {
    pub fn new(projects: Arc<dyn ProjectRepository>) -> Self {
        Self { projects }
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<Project>, AppError> {
        self.projects.list_by_user(user_id).await
    }

    pub async fn get(&self, id: i32, user_id: i32) -> Result<Project, AppError> {
        match self.projects.find_by_id(id).await? {
            Some(project) if project.is_owned_by(user_id) => Ok(project),
            _ => Err(not_found()),
        }
    }

    pub async fn create(&self, input: &ProjectInput, user_id: i32) -> Result<Project, AppError> {
        let project = self.projects.create(user_id, input).await?;
        log::info!("user {} created project {}", user_id, project.id);
        Ok(project)
    }

    pub async fn update(
        &self,
        id: i32,
        input: &ProjectInput,
        user_id: i32,
    ) -> Result<Project, AppError> {
        self.get(id, user_id).await?;
        let project = self.projects.update(id, input).await?;
        log::debug!("user {} updated project {}", user_id, id);
        Ok(project)
    }

    /// Deletes the project and, through the store, every task in it.
    pub async fn delete(&self, id: i32, user_id: i32) -> Result<(), AppError> {
        self.get(id, user_id).await?;
        self.projects.delete(id).await.map_err(|e| match e {
            AppError::NotFound(_) => not_found(),
            other => other,
        })?;
        log::info!("user {} deleted project {}", user_id, id);
        Ok(())
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Project not found".into())
}
