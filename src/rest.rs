use crate::auth::Credentials;
use crate::client::{create_http_client, Config};
use crate::error::{Result, TogglError};
use crate::project_users::ProjectUsers;
use crate::request::{ApiRequest, Transport};
use crate::response::Response;
use log::{debug, trace};
use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap};

/// Response headers that may carry a request id, in order of preference
const REQUEST_ID_HEADERS: [&str; 2] = ["X-Toggl-Request-Id", "X-Request-Id"];

/// HTTP client for the Toggl API
#[derive(Clone)]
pub struct TogglClient {
    /// HTTP client
    pub client: Client,
    /// Configuration
    pub config: Config,
    /// Optional credentials
    pub credentials: Option<Credentials>,
}

impl TogglClient {
    /// Create a new client with default configuration and no credentials
    pub fn new() -> Result<Self> {
        TogglClient::with_config(Config::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(TogglClient {
            client: create_http_client(&config)?,
            config,
            credentials: None,
        })
    }

    /// Create a client from `TOGGL_API_URL` and `TOGGL_API_TOKEN`
    pub fn from_env() -> Result<Self> {
        let credentials = Credentials::from_env()?;
        Ok(TogglClient::with_config(Config::from_env()?)?.with_credentials(credentials))
    }

    /// Set the credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Shortcut for API token credentials
    pub fn with_api_token(self, token: &str) -> Self {
        self.with_credentials(Credentials::api_token(token))
    }

    /// Project user operations bound to this client
    pub fn project_users(&self) -> ProjectUsers<&Self> {
        ProjectUsers::new(self)
    }

    /// Execute a request descriptor and return the decoded Response
    ///
    /// # Arguments
    /// * `path` - API endpoint path, relative to the base URL
    /// * `request` - Method and optional JSON body
    pub fn do_request(&self, path: &str, request: ApiRequest) -> Result<Response> {
        let url = self.config.endpoint_url(path)?;
        let method = request.method;

        let mut http_request = self
            .client
            .request(method.into(), url)
            .header("Accept", "application/json");

        if let Some(ref credentials) = self.credentials {
            http_request = credentials.apply(http_request);
        }

        if let Some(ref body) = request.body {
            trace!("{} {} body: {}", method, path, body);
            http_request = http_request.json(body);
        }

        let start = std::time::Instant::now();
        let http_response = http_request.send()?;
        let status = http_response.status();
        let request_id = request_id(http_response.headers());
        let is_html = http_response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("text/html"))
            .unwrap_or(false);

        let body = http_response.bytes()?;

        debug!(
            "[toggl] {} {} => {} in {:?}",
            method,
            path,
            status,
            start.elapsed()
        );

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body).to_string();
            // Proxies and gateways answer with HTML pages, not API errors
            if is_html {
                return Err(TogglError::http(status.as_u16(), text, None));
            }
            return Err(TogglError::api(status.as_u16(), &text, request_id));
        }

        let data = if body.iter().all(u8::is_ascii_whitespace) {
            None
        } else {
            Some(serde_json::from_slice(&body)?)
        };

        Ok(Response {
            status: status.as_u16(),
            data,
            request_id,
        })
    }
}

impl Transport for TogglClient {
    fn api_request(&self, path: &str, request: ApiRequest) -> Result<Response> {
        self.do_request(path, request)
    }
}

fn request_id(headers: &HeaderMap) -> Option<String> {
    REQUEST_ID_HEADERS.iter().find_map(|name| {
        headers
            .get(*name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    })
}
