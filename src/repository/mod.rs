//! Persistence interfaces.
//!
//! Services only see these traits. `PgStore` backs them with PostgreSQL;
//! `MemoryStore` keeps everything in process and is used by the test suite.
//! Neither performs ownership checks: that is the job of the service layer.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{NewUser, Project, ProjectInput, Task, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Fails with `AppError::Conflict` if the email is already taken.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Projects owned by `user_id`, newest first.
    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Project>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Project>, AppError>;

    async fn create(&self, user_id: i32, input: &ProjectInput) -> Result<Project, AppError>;

    /// Replaces name and description. Ownership is left untouched.
    async fn update(&self, id: i32, input: &ProjectInput) -> Result<Project, AppError>;

    /// Removes the project together with all of its tasks.
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

/// Field values for a task insert.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub project_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Tasks of `project_id`, newest first.
    async fn list_by_project(&self, project_id: i32) -> Result<Vec<Task>, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, AppError>;

    async fn create(&self, task: NewTask) -> Result<Task, AppError>;

    /// Writes title, description, due date and completion flag of `task`.
    /// `project_id` and `created_at` are never rewritten.
    async fn update(&self, task: &Task) -> Result<Task, AppError>;

    async fn delete(&self, id: i32) -> Result<(), AppError>;
}
