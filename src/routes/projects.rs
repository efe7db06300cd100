use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::ProjectInput;
use crate::state::AppState;

/// Lists the caller's projects, newest first.
#[get("")]
pub async fn list_projects(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let projects = state.projects.list(user.id).await?;
    Ok(HttpResponse::Ok().json(projects))
}

/// Fetches one project.
///
/// ## Responses:
/// - `200 OK`: the `Project`.
/// - `404 Not Found`: absent, or owned by someone else.
#[get("/{id}")]
pub async fn get_project(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let project = state.projects.get(path.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// Creates a project owned by the caller.
///
/// ## Responses:
/// - `201 Created`: the new `Project`.
/// - `422 Unprocessable Entity`: empty or overlong name, overlong description.
#[post("")]
pub async fn create_project(
    state: web::Data<AppState>,
    body: web::Json<ProjectInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let project = state.projects.create(&body, user.id).await?;
    Ok(HttpResponse::Created().json(project))
}

/// Replaces name and description.
#[put("/{id}")]
pub async fn update_project(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<ProjectInput>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let project = state
        .projects
        .update(path.into_inner(), &body, user.id)
        .await?;
    Ok(HttpResponse::Ok().json(project))
}

/// Deletes a project together with its tasks.
#[delete("/{id}")]
pub async fn delete_project(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    state.projects.delete(path.into_inner(), user.id).await?;
    Ok(HttpResponse::NoContent().finish())
}
