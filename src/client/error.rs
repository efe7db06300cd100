use std::fmt;

/// Failures seen by the API client and the session store.
#[derive(Debug)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    Transport(reqwest::Error),
    /// The server answered with a non-2xx status; `message` is its `error` field.
    Api { status: u16, message: String },
    NotLoggedIn,
    Session(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClientError::Transport(e) => write!(f, "Could not reach the server: {}", e),
            ClientError::Api { status, message } => write!(f, "{} ({})", message, status),
            ClientError::NotLoggedIn => write!(f, "Not logged in. Run `taskflow-cli login` first."),
            ClientError::Session(msg) => write!(f, "Session storage error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> ClientError {
        ClientError::Transport(error)
    }
}

impl From<std::io::Error> for ClientError {
    fn from(error: std::io::Error) -> ClientError {
        ClientError::Session(error.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> ClientError {
        ClientError::Session(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_and_status() {
        let err = ClientError::Api {
            status: 409,
            message: "Email already registered".into(),
        };
        assert_eq!(err.to_string(), "Email already registered (409)");
        assert_eq!(err.status(), Some(409));
        assert_eq!(ClientError::NotLoggedIn.status(), None);
    }
}
