use std::env;
use std::str::FromStr;

use crate::auth::token::JwtSettings;
use crate::error::AppError;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const MAX_EXPIRATION_DAYS: i64 = 3650;

pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub cors_origin: String,
    pub bcrypt_cost: u32,
    pub jwt: JwtSettings,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are required; everything else has a default.
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            database_max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", 5)?,
            server_port: parsed_or("SERVER_PORT", 8080)?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            cors_origin: env::var("CORS_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string()),
            bcrypt_cost: parsed_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            jwt: JwtSettings {
                secret: required("JWT_SECRET")?,
                issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "taskflow".to_string()),
                audience: env::var("JWT_AUDIENCE")
                    .unwrap_or_else(|_| "taskflow-client".to_string()),
                expiration_days: within(
                    "JWT_EXPIRATION_DAYS",
                    parsed_or("JWT_EXPIRATION_DAYS", 7)?,
                    MAX_EXPIRATION_DAYS,
                )?,
            },
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn required(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| AppError::InternalServerError(format!("{} must be set", key)))
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::InternalServerError(format!("{} has an invalid value: {}", key, raw))),
        Err(_) => Ok(default),
    }
}

/// Accepts `1..=max`.
fn within(key: &str, value: i64, max: i64) -> Result<i64, AppError> {
    if (1..=max).contains(&value) {
        Ok(value)
    } else {
        Err(AppError::InternalServerError(format!(
            "{} must be between 1 and {}, got {}",
            key, max, value
        )))
    }
}
