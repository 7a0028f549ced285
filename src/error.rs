use thiserror::Error;

/// Main error type for Toggl API operations
#[derive(Debug, Error)]
pub enum TogglError {
    /// Error status returned by the Toggl API
    #[error("Toggl API error {status}: {message}")]
    Api {
        status: u16,
        message: String,
        request_id: Option<String>,
    },

    /// HTTP transport error with an unreadable body
    #[error("HTTP error {status}: {body}")]
    Http {
        status: u16,
        body: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No credentials could be found for the client
    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    /// Request building error
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl TogglError {
    /// Create a new API error from a status code and the raw response text.
    ///
    /// Toggl reports most failures as a bare JSON string (`"Project not found"`)
    /// or as plain text, so a quoted JSON string is unwrapped first.
    pub fn api(status: u16, body: &str, request_id: Option<String>) -> Self {
        let trimmed = body.trim();
        let message = match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(serde_json::Value::String(s)) => s,
            _ if trimmed.is_empty() => format!("HTTP {}", status),
            _ => trimmed.to_string(),
        };

        TogglError::Api {
            status,
            message,
            request_id,
        }
    }

    /// Create a new HTTP error
    pub fn http(status: u16, body: String, source: Option<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        TogglError::Http { status, body, source }
    }

    /// Check if this error is a permission denied error (403)
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, TogglError::Api { status: 403, .. })
    }

    /// Check if this error is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, TogglError::Api { status: 404, .. })
    }

    /// Get the HTTP status code if the error came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TogglError::Api { status, .. } | TogglError::Http { status, .. } => Some(*status),
            TogglError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for Toggl API operations
pub type Result<T> = std::result::Result<T, TogglError>;
