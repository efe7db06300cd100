pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;

use actix_web::web;

/// Registers everything mounted under `/api`.
///
/// Task routes live in a nested scope so that `/projects/{id}` and
/// `/projects/{project_id}/tasks/...` never shadow each other.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::register),
    )
    .service(
        web::scope("/projects")
            .service(
                web::scope("/{project_id}/tasks")
                    .service(tasks::list_tasks)
                    .service(tasks::create_task)
                    .service(tasks::get_task)
                    .service(tasks::update_task)
                    .service(tasks::toggle_task)
                    .service(tasks::delete_task),
            )
            .service(projects::list_projects)
            .service(projects::create_project)
            .service(projects::get_project)
            .service(projects::update_project)
            .service(projects::delete_project),
    );
}
