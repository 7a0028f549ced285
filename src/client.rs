use crate::error::{Result, TogglError};
use reqwest::blocking::{Client, ClientBuilder};
use std::time::Duration;
use url::Url;

/// Environment variable overriding the API base URL
pub const ENV_API_URL: &str = "TOGGL_API_URL";

/// Create the HTTP client for Toggl API requests
/// with connection pooling and the configured timeouts
pub fn create_http_client(config: &Config) -> Result<Client> {
    let client = ClientBuilder::new()
        .pool_max_idle_per_host(50)
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}

/// Configuration for the Toggl API client
#[derive(Debug, Clone)]
pub struct Config {
    /// URL scheme (http or https)
    pub scheme: String,
    /// API host, optionally with a port
    pub host: String,
    /// Path prefix of the API version, without surrounding slashes
    pub base_path: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Total request timeout
    pub timeout: Duration,
    /// Connection establishment timeout
    pub connect_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scheme: "https".to_string(),
            host: "api.track.toggl.com".to_string(),
            base_path: "api/v9".to_string(),
            user_agent: concat!("toggl-client-rs/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl Config {
    /// Create a new configuration with the given scheme and host
    pub fn new(scheme: String, host: String) -> Self {
        Config {
            scheme,
            host,
            ..Config::default()
        }
    }

    /// Create a configuration from a full base URL such as
    /// `http://localhost:8080/api/v9`
    pub fn from_url(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)?;
        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(TogglError::RequestBuild(format!(
                    "base URL has no host: {}",
                    base_url
                )))
            }
        };

        Ok(Config {
            scheme: url.scheme().to_string(),
            host,
            base_path: url.path().trim_matches('/').to_string(),
            ..Config::default()
        })
    }

    /// Default configuration, with the base URL taken from `TOGGL_API_URL` if set
    pub fn from_env() -> Result<Self> {
        match std::env::var(ENV_API_URL) {
            Ok(url) if !url.trim().is_empty() => Config::from_url(url.trim()),
            _ => Ok(Config::default()),
        }
    }

    /// Set the API path prefix
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = base_path.trim_matches('/').to_string();
        self
    }

    /// Set the User-Agent header
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// Set the total request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> String {
        if self.base_path.is_empty() {
            format!("{}://{}", self.scheme, self.host)
        } else {
            format!("{}://{}/{}", self.scheme, self.host, self.base_path)
        }
    }

    /// Build the full URL of an endpoint path relative to the base URL
    pub fn endpoint_url(&self, path: &str) -> Result<Url> {
        let url = format!("{}/{}", self.base_url(), path.trim_start_matches('/'));
        Ok(Url::parse(&url)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let config = Config::default();
        assert_eq!(config.base_url(), "https://api.track.toggl.com/api/v9");
    }

    #[test]
    fn test_from_url_with_port() {
        let config = Config::from_url("http://127.0.0.1:8080/api/v9/").unwrap();
        assert_eq!(config.scheme, "http");
        assert_eq!(config.host, "127.0.0.1:8080");
        assert_eq!(config.base_path, "api/v9");
        assert_eq!(config.base_url(), "http://127.0.0.1:8080/api/v9");
    }

    #[test]
    fn test_from_url_without_path() {
        let config = Config::from_url("http://localhost:9000").unwrap();
        assert_eq!(config.base_path, "");
        assert_eq!(config.base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_endpoint_url() {
        let config = Config::new("http".to_string(), "localhost:8080".to_string());
        let url = config.endpoint_url("/workspaces/5/project_users").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v9/workspaces/5/project_users");
    }

    #[test]
    fn test_endpoint_url_keeps_comma_ids() {
        let config = Config::default();
        let url = config.endpoint_url("workspaces/5/project_users/1,2").unwrap();
        assert_eq!(url.path(), "/api/v9/workspaces/5/project_users/1,2");
    }

    #[test]
    fn test_builder_setters() {
        let config = Config::default()
            .with_base_path("/api/v8/")
            .with_user_agent("tests")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_path, "api/v8");
        assert_eq!(config.user_agent, "tests");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
