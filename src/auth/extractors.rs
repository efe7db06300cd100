use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;

/// The caller identity resolved from a verified token.
///
/// Only usable on routes behind `AuthMiddleware`, which inserts the `Claims`
/// this extractor reads. Missing claims or a non-numeric subject are rejected
/// with `AppError::Unauthorized`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub email: String,
}

impl AuthenticatedUser {
    fn from_claims(claims: &Claims) -> Result<Self, AppError> {
        Ok(Self {
            id: claims.user_id()?,
            email: claims.email.clone(),
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = match req.extensions().get::<Claims>() {
            Some(claims) => AuthenticatedUser::from_claims(claims),
            None => Err(AppError::Unauthorized(
                "User identity not found in request. Ensure AuthMiddleware is active.".to_string(),
            )),
        };
        ready(result.map_err(Into::into))
    }
}
