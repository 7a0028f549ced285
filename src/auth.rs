use crate::error::{Result, TogglError};
use reqwest::blocking::RequestBuilder;
use std::fmt;

/// Environment variable holding the Toggl API token
pub const ENV_API_TOKEN: &str = "TOGGL_API_TOKEN";

/// Password Toggl expects alongside an API token in basic auth
const API_TOKEN_PASSWORD: &str = "api_token";

/// Credentials used to authenticate against the Toggl API.
/// Both forms are sent as HTTP basic auth.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Personal API token from the Toggl profile page
    ApiToken(String),
    /// Account email and password
    Basic { email: String, password: String },
}

impl Credentials {
    /// Create credentials from an API token
    pub fn api_token(token: &str) -> Self {
        Credentials::ApiToken(token.to_string())
    }

    /// Create credentials from an email and password
    pub fn basic(email: &str, password: &str) -> Self {
        Credentials::Basic {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    /// Read an API token from `TOGGL_API_TOKEN`
    pub fn from_env() -> Result<Self> {
        match std::env::var(ENV_API_TOKEN) {
            Ok(token) if !token.trim().is_empty() => Ok(Credentials::api_token(token.trim())),
            _ => Err(TogglError::MissingCredentials(format!(
                "{} is not set",
                ENV_API_TOKEN
            ))),
        }
    }

    /// Username and password pair for basic auth
    pub fn basic_auth_pair(&self) -> (&str, &str) {
        match self {
            Credentials::ApiToken(token) => (token, API_TOKEN_PASSWORD),
            Credentials::Basic { email, password } => (email, password),
        }
    }

    /// Attach the credentials to an outgoing request
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        let (user, password) = self.basic_auth_pair();
        request.basic_auth(user, Some(password))
    }
}

// Keep secrets out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiToken(_) => f.debug_tuple("ApiToken").field(&"[redacted]").finish(),
            Credentials::Basic { email, .. } => f
                .debug_struct("Basic")
                .field("email", email)
                .field("password", &"[redacted]")
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_token_pair() {
        let creds = Credentials::api_token("abc123");
        assert_eq!(creds.basic_auth_pair(), ("abc123", "api_token"));
    }

    #[test]
    fn test_basic_pair() {
        let creds = Credentials::basic("me@example.com", "hunter2");
        assert_eq!(creds.basic_auth_pair(), ("me@example.com", "hunter2"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let token = format!("{:?}", Credentials::api_token("abc123"));
        assert!(!token.contains("abc123"));

        let basic = format!("{:?}", Credentials::basic("me@example.com", "hunter2"));
        assert!(basic.contains("me@example.com"));
        assert!(!basic.contains("hunter2"));
    }
}
