use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::ClientError;

lazy_static! {
    static ref TASKS_PATH: Regex = Regex::new(r"^/projects/(\d+)/tasks/?$").unwrap();
}

/// Screens of the client. Anything but `Login` and `Register` needs a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Projects,
    Tasks { project_id: i32 },
}

impl Route {
    /// Unknown paths land on `Login`.
    pub fn parse(path: &str) -> Route {
        match path.trim_end_matches('/') {
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/projects" => Route::Projects,
            _ => TASKS_PATH
                .captures(path)
                .and_then(|caps| caps[1].parse().ok())
                .map(|project_id| Route::Tasks { project_id })
                .unwrap_or(Route::Login),
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    /// The route actually shown: protected routes redirect to `Login`
    /// without a token.
    pub fn guard(self, authenticated: bool) -> Route {
        if self.requires_auth() && !authenticated {
            Route::Login
        } else {
            self
        }
    }

    /// `guard` for callers that cannot render the login screen themselves:
    /// a redirect to `Login` comes back as `ClientError::NotLoggedIn`.
    pub fn authorize(self, authenticated: bool) -> Result<Route, ClientError> {
        match self.guard(authenticated) {
            Route::Login if self != Route::Login => {
                log::debug!("{} needs a token, redirecting to {}", self, Route::Login);
                Err(ClientError::NotLoggedIn)
            }
            route => Ok(route),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Route::Login => write!(f, "/login"),
            Route::Register => write!(f, "/register"),
            Route::Projects => write!(f, "/projects"),
            Route::Tasks { project_id } => write!(f, "/projects/{}/tasks", project_id),
        }
    }
}
