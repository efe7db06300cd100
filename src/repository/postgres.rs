use async_trait::async_trait;
use sqlx::PgPool;

use super::{NewTask, ProjectRepository, TaskRepository, UserRepository};
use crate::error::AppError;
use crate::models::{NewUser, Project, ProjectInput, Task, User};

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, created_at";
const PROJECT_COLUMNS: &str = "id, name, description, created_at, user_id";
const TASK_COLUMNS: &str = "id, title, description, is_completed, created_at, due_date, project_id";

/// PostgreSQL-backed implementation of every repository trait.
///
/// Cascading deletes are enforced by the foreign keys in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, first_name, last_name)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict("Email already registered".into()),
            other => other,
        })
    }
}

#[async_trait]
impl ProjectRepository for PgStore {
    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
            PROJECT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(projects)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Project>, AppError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {} FROM projects WHERE id = $1",
            PROJECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(project)
    }

    async fn create(&self, user_id: i32, input: &ProjectInput) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "INSERT INTO projects (name, description, user_id)
             VALUES ($1, $2, $3)
             RETURNING {}",
            PROJECT_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(project)
    }

    async fn update(&self, id: i32, input: &ProjectInput) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "UPDATE projects SET name = $1, description = $2
             WHERE id = $3
             RETURNING {}",
            PROJECT_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(project)
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for PgStore {
    async fn list_by_project(&self, project_id: i32) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE project_id = $1 ORDER BY created_at DESC, id DESC",
            TASK_COLUMNS
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tasks)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id = $1",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(task)
    }

    async fn create(&self, task: NewTask) -> Result<Task, AppError> {
        let created = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (title, description, due_date, project_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.project_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, task: &Task) -> Result<Task, AppError> {
        let updated = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks
             SET title = $1, description = $2, due_date = $3, is_completed = $4
             WHERE id = $5
             RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.is_completed)
        .bind(task.id)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Task not found".into()));
        }
        Ok(())
    }
}
