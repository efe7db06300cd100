use std::sync::Arc;

use actix_web::web;

use crate::auth::{hash_password, verify_password, AuthResponse, LoginRequest, RegisterRequest, TokenIssuer};
use crate::error::AppError;
use crate::models::{NewUser, User};
use crate::repository::UserRepository;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Registration and login.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenIssuer,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenIssuer, hash_cost: u32) -> Self {
        Self {
            users,
            tokens,
            hash_cost,
        }
    }

    /// Creates an account and signs the caller in.
    ///
    /// Fails with `AppError::Conflict` when the email is already registered,
    /// whatever the password.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        if self.users.find_by_email(&request.email).await?.is_some() {
            log::info!("registration refused, email already registered");
            return Err(AppError::Conflict("Email already registered".into()));
        }

        let cost = self.hash_cost;
        let password = request.password;
        let password_hash = web::block(move || hash_password(&password, cost))
            .await
            .map_err(|e| AppError::InternalServerError(format!("Password hashing aborted: {}", e)))??;

        let user = self
            .users
            .create(NewUser {
                email: request.email,
                password_hash,
                first_name: request.first_name,
                last_name: request.last_name,
            })
            .await?;

        log::info!("registered user {}", user.id);
        self.respond(&user)
    }

    /// Checks the credentials and issues a token.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        let Some(user) = self.users.find_by_email(&request.email).await? else {
            log::warn!("failed login attempt");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        let password = request.password;
        let stored_hash = user.password_hash.clone();
        let matches = web::block(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AppError::InternalServerError(format!("Password check aborted: {}", e)))??;

        if !matches {
            log::warn!("failed login attempt");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        log::info!("user {} logged in", user.id);
        self.respond(&user)
    }

    fn respond(&self, user: &User) -> Result<AuthResponse, AppError> {
        let issued = self.tokens.issue(user)?;
        Ok(AuthResponse {
            token: issued.token,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            expires_at: issued.expires_at,
        })
    }
}
