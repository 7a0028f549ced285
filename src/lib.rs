//! # toggl-client - Toggl Track REST API client for Rust
//!
//! A Rust client for the Toggl Track v9 REST API. A shared transport takes
//! care of URLs, authentication and response decoding; resource bindings
//! turn typed requests into request descriptors for it.
//!
//! ## Features
//!
//! - Blocking HTTP transport with API token or email/password authentication
//! - Typed project user operations, single and batch
//! - Pluggable [`Transport`] trait, so the bindings can run on any executor
//! - Optional `async` feature returning futures
//!
//! ## Basic Usage
//!
//! ```no_run
//! use toggl_client::{AddProjectUsers, Param, TogglClient, UpdateProjectUser};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TogglClient::new()?.with_api_token("your-api-token");
//!     let users = client.project_users();
//!
//!     // Add two users to project 10 of workspace 5 in one call
//!     let added = users.add_project_users(
//!         &AddProjectUsers::new(10u64, [20u64, 21u64], 5u64).with_option("manager", false),
//!     )?;
//!
//!     // Promote the first one
//!     let mut options = Param::new();
//!     options.insert("manager".to_string(), true.into());
//!     users.update_project_user(&UpdateProjectUser::new(added[0].id, 5u64, options))?;
//!
//!     // And remove both again
//!     users.delete_project_users(added.iter().map(|pu| pu.id), 5u64)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! ```no_run
//! use toggl_client::{Config, Credentials, TogglClient};
//!
//! let config = Config::from_url("http://localhost:8080/api/v9")?;
//! let client = TogglClient::with_config(config)?
//!     .with_credentials(Credentials::basic("me@example.com", "secret"));
//! # Ok::<(), toggl_client::TogglError>(())
//! ```

pub mod auth;
pub mod client;
pub mod error;
#[cfg(feature = "async")]
pub mod nonblocking;
pub mod project_users;
pub mod request;
pub mod response;
pub mod rest;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types for convenience
pub use auth::Credentials;
pub use client::Config;
pub use error::{Result, TogglError};
#[cfg(feature = "async")]
pub use nonblocking::AsyncProjectUsers;
pub use project_users::{
    AddProjectUser, AddProjectUsers, Param, ProjectUser, ProjectUsers, UpdateProjectUser, UpdateProjectUsers,
};
pub use request::{ApiRequest, Id, Method, Transport};
pub use response::Response;
pub use rest::TogglClient;

// Re-export serde_json for convenience
pub use serde_json::json;
