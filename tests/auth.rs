mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{bearer, init_app, jwt_settings, test_state};
use taskflow::auth::{AuthResponse, TokenIssuer};

#[actix_rt::test]
async fn test_register_and_login_flow() {
    let app = init_app(test_state()).await;

    let register_payload = json!({
        "email": "alice@test.com",
        "password": "pw123",
        "firstName": "Alice"
    });
    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body_bytes = test::read_body(resp).await;
    assert_eq!(
        status,
        StatusCode::OK,
        "Registration failed. Body: {:?}",
        String::from_utf8_lossy(&body_bytes)
    );
    let registered: AuthResponse = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(registered.email, "alice@test.com");
    assert_eq!(registered.first_name.as_deref(), Some("Alice"));

    let claims = TokenIssuer::new(jwt_settings())
        .verify(&registered.token)
        .unwrap();
    assert_eq!(claims.exp, registered.expires_at.timestamp());

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "alice@test.com", "password": "pw123" }))
        .to_request();
    let logged_in: AuthResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(logged_in.email, "alice@test.com");

    let req = test::TestRequest::get()
        .uri("/api/projects")
        .insert_header(bearer(&logged_in.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_duplicate_registration_is_conflict() {
    let app = init_app(test_state()).await;
    common::register(&app, "alice@test.com").await;

    for password in ["pw123", "another-password"] {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({ "email": "alice@test.com", "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }
}

#[actix_rt::test]
async fn test_invalid_registration_is_unprocessable() {
    let app = init_app(test_state()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": "alice.test.com", "password": "pw123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_rt::test]
async fn test_login_failures_share_one_body() {
    let app = init_app(test_state()).await;
    common::register(&app, "alice@test.com").await;

    let mut bodies = Vec::new();
    for (email, password) in [("alice@test.com", "wrong"), ("nobody@test.com", "pw123")] {
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        bodies.push(test::read_body(resp).await);
    }
    assert_eq!(bodies[0], bodies[1]);
}

#[actix_rt::test]
async fn test_protected_routes_require_valid_token() {
    let app = init_app(test_state()).await;

    let req = test::TestRequest::get().uri("/api/projects").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());

    let req = test::TestRequest::get()
        .uri("/api/projects")
        .insert_header(bearer("not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let foreign = TokenIssuer::new(taskflow::auth::JwtSettings {
        secret: "some-other-secret".into(),
        ..jwt_settings()
    });
    let req = test::TestRequest::get()
        .uri("/api/projects/1/tasks")
        .insert_header(bearer(&forged_token(&foreign)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_health_is_public() {
    let app = init_app(test_state()).await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "ok");
}

fn forged_token(issuer: &TokenIssuer) -> String {
    use chrono::Utc;
    use taskflow::models::User;

    issuer
        .issue(&User {
            id: 1,
            email: "mallory@test.com".into(),
            password_hash: String::new(),
            first_name: None,
            last_name: None,
            created_at: Utc::now(),
        })
        .unwrap()
        .token
}
