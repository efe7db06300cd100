use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::TaskInput;
use crate::state::AppState;

/// Lists the tasks of a project, newest first.
///
/// A project the caller does not own yields an empty list rather than an error.
#[get("")]
pub async fn list_tasks(
    state: web::Data<AppState>,
    project_id: web::Path<i32>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = state.tasks.list(project_id.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Fetches one task.
///
/// ## Responses:
/// - `200 OK`: the `Task`.
/// - `404 Not Found`: project not owned, task absent, or task in another project.
#[get("/{id}")]
pub async fn get_task(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let (project_id, id) = path.into_inner();
    let task = state.tasks.get(id, project_id, user.id).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Creates a task in the given project.
///
/// ## Request Body:
/// - `title`: 1 to 200 characters.
/// - `description` (optional): at most 1000 characters.
/// - `dueDate` (optional): RFC 3339, naive date-time or plain date; stored as UTC.
///
/// ## Responses:
/// - `201 Created`: the new `Task`, not completed.
/// - `400 Bad Request`: project not owned, or an unparsable body.
/// - `422 Unprocessable Entity`: validation failed.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    project_id: web::Path<i32>,
    body: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let task = state
        .tasks
        .create(body.into_inner(), project_id.into_inner(), user.id)
        .await?;
    Ok(HttpResponse::Created().json(task))
}

/// Replaces title, description and due date. Omitting `dueDate` clears it.
#[put("/{id}")]
pub async fn update_task(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
    body: web::Json<TaskInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let (project_id, id) = path.into_inner();
    let task = state
        .tasks
        .update(id, body.into_inner(), project_id, user.id)
        .await?;
    Ok(HttpResponse::Ok().json(task))
}

#[patch("/{id}/toggle")]
pub async fn toggle_task(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let (project_id, id) = path.into_inner();
    let task = state.tasks.toggle_complete(id, project_id, user.id).await?;
    Ok(HttpResponse::Ok().json(task))
}

#[delete("/{id}")]
pub async fn delete_task(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let (project_id, id) = path.into_inner();
    state.tasks.delete(id, project_id, user.id).await?;
    Ok(HttpResponse::NoContent().finish())
}
