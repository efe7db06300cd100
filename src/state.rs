use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{JwtSettings, TokenIssuer};
use crate::repository::{
    MemoryStore, PgStore, ProjectRepository, TaskRepository, UserRepository,
};
use crate::services::{AuthService, ProjectService, TaskService};

/// Everything the handlers and `AuthMiddleware` need, registered once as
/// `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub projects: ProjectService,
    pub tasks: TaskService,
    pub tokens: TokenIssuer,
}

impl AppState {
    /// Wires the services to a PostgreSQL pool.
    pub fn postgres(pool: PgPool, jwt: JwtSettings, bcrypt_cost: u32) -> Self {
        let store = Arc::new(PgStore::new(pool));
        Self::build(
            store.clone(),
            store.clone(),
            store,
            TokenIssuer::new(jwt),
            bcrypt_cost,
        )
    }

    /// Wires the services to a fresh in-process store.
    pub fn in_memory(jwt: JwtSettings, bcrypt_cost: u32) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::build(
            store.clone(),
            store.clone(),
            store,
            TokenIssuer::new(jwt),
            bcrypt_cost,
        )
    }

    fn build(
        users: Arc<dyn UserRepository>,
        projects: Arc<dyn ProjectRepository>,
        tasks: Arc<dyn TaskRepository>,
        tokens: TokenIssuer,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            auth: AuthService::new(users, tokens.clone(), bcrypt_cost),
            projects: ProjectService::new(projects.clone()),
            tasks: TaskService::new(tasks, projects),
            tokens,
        }
    }
}
