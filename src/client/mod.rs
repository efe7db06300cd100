//! Client side of TaskFlow: the HTTP API client, the persisted session,
//! route guarding and the text views used by `taskflow-cli`.

pub mod api;
pub mod error;
pub mod render;
pub mod routes;
pub mod session;
pub mod stats;

pub use api::ApiClient;
pub use error::ClientError;
pub use routes::Route;
pub use session::{FileStore, Identity, KeyValueStore, MemoryStore, Session};
pub use stats::TaskStats;
