use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::{NewTask, ProjectRepository, TaskRepository, UserRepository};
use crate::error::AppError;
use crate::models::{NewUser, Project, ProjectInput, Task, User};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    next_user_id: i32,
    next_project_id: i32,
    next_task_id: i32,
}

impl Tables {
    fn next_id(counter: &mut i32) -> i32 {
        *counter += 1;
        *counter
    }
}

/// In-process store with the same semantics as the PostgreSQL schema:
/// serial ids starting at 1, unique emails, cascading project deletes.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        self.tables
            .lock()
            .map_err(|_| AppError::InternalServerError("memory store lock poisoned".into()))
    }
}

/// Newest first; ids break ties between rows created in the same instant.
fn newest_first<T, K: Ord>(rows: &mut [T], key: impl Fn(&T) -> K) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.lock()?;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.lock()?;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("Email already registered".into()));
        }
        let id = Tables::next_id(&mut tables.next_user_id);
        let created = User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: Utc::now(),
        };
        tables.users.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl ProjectRepository for MemoryStore {
    async fn list_by_user(&self, user_id: i32) -> Result<Vec<Project>, AppError> {
        let tables = self.lock()?;
        let mut projects: Vec<Project> = tables
            .projects
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut projects, |p| (p.created_at, p.id));
        Ok(projects)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Project>, AppError> {
        let tables = self.lock()?;
        Ok(tables.projects.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, user_id: i32, input: &ProjectInput) -> Result<Project, AppError> {
        let mut tables = self.lock()?;
        if !tables.users.iter().any(|u| u.id == user_id) {
            return Err(AppError::DatabaseError(format!(
                "projects.user_id references missing user {}",
                user_id
            )));
        }
        let id = Tables::next_id(&mut tables.next_project_id);
        let project = Project {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            created_at: Utc::now(),
            user_id,
        };
        tables.projects.push(project.clone());
        Ok(project)
    }

    async fn update(&self, id: i32, input: &ProjectInput) -> Result<Project, AppError> {
        let mut tables = self.lock()?;
        let project = tables
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;
        project.name = input.name.clone();
        project.description = input.description.clone();
        Ok(project.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut tables = self.lock()?;
        let before = tables.projects.len();
        tables.projects.retain(|p| p.id != id);
        if tables.projects.len() == before {
            return Err(AppError::NotFound("Project not found".into()));
        }
        tables.tasks.retain(|t| t.project_id != id);
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn list_by_project(&self, project_id: i32) -> Result<Vec<Task>, AppError> {
        let tables = self.lock()?;
        let mut tasks: Vec<Task> = tables
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect();
        newest_first(&mut tasks, |t| (t.created_at, t.id));
        Ok(tasks)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, AppError> {
        let tables = self.lock()?;
        Ok(tables.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn create(&self, task: NewTask) -> Result<Task, AppError> {
        let mut tables = self.lock()?;
        if !tables.projects.iter().any(|p| p.id == task.project_id) {
            return Err(AppError::DatabaseError(format!(
                "tasks.project_id references missing project {}",
                task.project_id
            )));
        }
        let id = Tables::next_id(&mut tables.next_task_id);
        let created = Task {
            id,
            title: task.title,
            description: task.description,
            is_completed: false,
            created_at: Utc::now(),
            due_date: task.due_date,
            project_id: task.project_id,
        };
        tables.tasks.push(created.clone());
        Ok(created)
    }

    async fn update(&self, task: &Task) -> Result<Task, AppError> {
        let mut tables = self.lock()?;
        let stored = tables
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
        stored.title = task.title.clone();
        stored.description = task.description.clone();
        stored.due_date = task.due_date;
        stored.is_completed = task.is_completed;
        Ok(stored.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut tables = self.lock()?;
        let before = tables.tasks.len();
        tables.tasks.retain(|t| t.id != id);
        if tables.tasks.len() == before {
            return Err(AppError::NotFound("Task not found".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            first_name: None,
            last_name: None,
        }
    }

    fn project_input(name: &str) -> ProjectInput {
        ProjectInput {
            name: name.to_string(),
            description: None,
        }
    }

    #[actix_rt::test]
    async fn test_duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        UserRepository::create(&store, new_user("a@test.com")).await.unwrap();
        let second = UserRepository::create(&store, new_user("a@test.com")).await;
        assert!(matches!(second, Err(AppError::Conflict(_))));
    }

    #[actix_rt::test]
    async fn test_ids_start_at_one_per_table() {
        let store = MemoryStore::new();
        let user = UserRepository::create(&store, new_user("a@test.com")).await.unwrap();
        let project = ProjectRepository::create(&store, user.id, &project_input("Home"))
            .await
            .unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(project.id, 1);
    }

    #[actix_rt::test]
    async fn test_project_delete_cascades_to_tasks() {
        let store = MemoryStore::new();
        let user = UserRepository::create(&store, new_user("a@test.com")).await.unwrap();
        let home = ProjectRepository::create(&store, user.id, &project_input("Home"))
            .await
            .unwrap();
        let work = ProjectRepository::create(&store, user.id, &project_input("Work"))
            .await
            .unwrap();
        for (project_id, title) in [(home.id, "Buy milk"), (work.id, "Write report")] {
            TaskRepository::create(
                &store,
                NewTask {
                    project_id,
                    title: title.to_string(),
                    description: None,
                    due_date: None,
                },
            )
            .await
            .unwrap();
        }

        ProjectRepository::delete(&store, home.id).await.unwrap();

        assert!(store.list_by_project(home.id).await.unwrap().is_empty());
        assert_eq!(store.list_by_project(work.id).await.unwrap().len(), 1);
    }

    #[actix_rt::test]
    async fn test_list_is_newest_first() {
        let store = MemoryStore::new();
        let user = UserRepository::create(&store, new_user("a@test.com")).await.unwrap();
        for name in ["first", "second", "third"] {
            ProjectRepository::create(&store, user.id, &project_input(name))
                .await
                .unwrap();
        }
        let names: Vec<String> = store
            .list_by_user(user.id)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }
}
