use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

use crate::auth::{LoginRequest, RegisterRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Register a new user
///
/// Creates the account and signs the caller in straight away.
///
/// ## Responses:
/// - `200 OK`: `AuthResponse` with a fresh token.
/// - `409 Conflict`: the email is already registered.
/// - `422 Unprocessable Entity`: malformed email or missing password.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;
    let response = state.auth.register(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Login user
///
/// ## Responses:
/// - `200 OK`: `AuthResponse` with a fresh token.
/// - `401 Unauthorized`: unknown email or wrong password, indistinguishably.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    if body.validate().is_err() {
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }
    let response = state.auth.login(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
