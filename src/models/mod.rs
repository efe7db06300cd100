pub mod project;
pub mod task;
pub mod user;

pub use project::{Project, ProjectInput};
pub use task::{normalize_due_date, Task, TaskInput};
pub use user::{NewUser, User};
