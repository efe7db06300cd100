#![doc = "The `taskflow` library crate."]
#![doc = ""]
#![doc = "Domain models, persistence, services, authentication and HTTP routes for the"]
#![doc = "TaskFlow server, plus the API client and session handling used by `taskflow-cli`."]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

pub use error::AppError;
pub use state::AppState;
