//! Business rules sitting between the HTTP handlers and the repositories.
//!
//! Ownership is enforced here: handlers pass the caller id along and never
//! touch a repository directly.

pub mod auth;
pub mod projects;
pub mod tasks;

pub use auth::AuthService;
pub use projects::ProjectService;
pub use tasks::TaskService;
