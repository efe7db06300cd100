#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use taskflow::auth::{AuthMiddleware, JwtSettings};
use taskflow::error::{json_error_handler, path_error_handler};
use taskflow::routes::{self, health};
use taskflow::state::AppState;

pub fn jwt_settings() -> JwtSettings {
    JwtSettings {
        secret: "integration-test-secret".into(),
        issuer: "taskflow".into(),
        audience: "taskflow-client".into(),
        expiration_days: 7,
    }
}

/// Fresh in-memory state with a cheap bcrypt cost.
pub fn test_state() -> AppState {
    AppState::in_memory(jwt_settings(), 4)
}

pub async fn init_app(
    state: AppState,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
{
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Registers `email` with password `pw123` and returns the bearer token.
pub async fn register(
    app: &impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    email: &str,
) -> String {
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": email, "password": "pw123" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;
    body["token"]
        .as_str()
        .expect("register response carries a token")
        .to_string()
}

pub async fn create_project(
    app: &impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    token: &str,
    name: &str,
) -> i64 {
    let req = test::TestRequest::post()
        .uri("/api/projects")
        .insert_header(bearer(token))
        .set_json(json!({ "name": name }))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;
    body["id"].as_i64().expect("project id")
}

pub async fn create_task(
    app: &impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    token: &str,
    project_id: i64,
    payload: Value,
) -> Value {
    let req = test::TestRequest::post()
        .uri(&format!("/api/projects/{}/tasks", project_id))
        .insert_header(bearer(token))
        .set_json(payload)
        .to_request();
    test::call_and_read_body_json(app, req).await
}
