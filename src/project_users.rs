//! Project users: the association between a user and a project of a workspace.
//!
//! Every operation turns its request struct into an [`ApiRequest`] and hands it
//! to a [`Transport`]. Batch operations join their IDs into one comma-separated
//! value and go through the single-item path, so a batch is always exactly one
//! remote call.
//!
//! ```no_run
//! use toggl_client::{AddProjectUser, TogglClient};
//!
//! let client = TogglClient::from_env()?;
//! let added = client.project_users().add_project_user(
//!     &AddProjectUser::new(10u64, 20u64, 5u64)
//!         .with_option("manager", true)
//!         .with_fields(["fullname", "email"]),
//! )?;
//! println!("added project user {}", added.id);
//! # Ok::<(), toggl_client::TogglError>(())
//! ```

use crate::error::{Result, TogglError};
use crate::request::{join_fields, join_ids, path_segment, ApiRequest, Id, Method, Transport};
use crate::response::Response;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Project user attributes (`manager`, `rate`, ...) passed through to the API as-is.
pub type Param = serde_json::Map<String, Value>;

/// A user's membership in a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectUser {
    /// Project user ID
    pub id: u64,

    #[serde(alias = "pid")]
    pub project_id: u64,

    #[serde(alias = "uid")]
    pub user_id: u64,

    #[serde(alias = "wid", default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<u64>,

    /// Whether the user manages the project
    #[serde(default)]
    pub manager: bool,

    /// Hourly rate for this user on this project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,

    /// Last update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<DateTime<Utc>>,

    /// Any other attribute, including those requested through a field selector
    #[serde(flatten)]
    pub extra: Param,
}

fn collection_path(workspace_id: &Id) -> Result<String> {
    Ok(format!("workspaces/{}/project_users", path_segment(workspace_id)?))
}

fn item_path(workspace_id: &Id, id: &Id) -> Result<String> {
    Ok(format!("{}/{}", collection_path(workspace_id)?, path_segment(id)?))
}

/// Wrap attributes into the `{"project_user": {...}}` body, adding the joined
/// field selector when one is given.
fn project_user_body(mut attributes: Param, fields: Option<&[String]>) -> Value {
    if let Some(fields) = fields.and_then(|f| join_fields(f)) {
        attributes.insert("fields".to_string(), Value::String(fields));
    }
    json!({ "project_user": attributes })
}

fn collect_fields<I, S>(fields: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fields.into_iter().map(Into::into).collect()
}

/// Decode a batch result, which is a list of records, or a single record
/// when the API collapses a one-element batch.
fn records(response: Response) -> Result<Vec<ProjectUser>> {
    match response.into_data().data {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| serde_json::from_value::<ProjectUser>(item).map_err(TogglError::from))
            .collect(),
        Some(single) => Ok(vec![serde_json::from_value(single)?]),
    }
}

/// Add one user (or a pre-joined list of users) to a project
#[derive(Debug, Clone, PartialEq)]
pub struct AddProjectUser {
    pub project_id: Id,
    pub user_id: Id,
    pub workspace_id: Id,
    pub options: Param,
    pub fields: Option<Vec<String>>,
}

impl AddProjectUser {
    pub fn new(project_id: impl Into<Id>, user_id: impl Into<Id>, workspace_id: impl Into<Id>) -> Self {
        AddProjectUser {
            project_id: project_id.into(),
            user_id: user_id.into(),
            workspace_id: workspace_id.into(),
            options: Param::new(),
            fields: None,
        }
    }

    /// Replace all project user attributes
    pub fn with_options(mut self, options: Param) -> Self {
        self.options = options;
        self
    }

    /// Set a single project user attribute
    pub fn with_option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    /// Select the user fields the API should return
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(collect_fields(fields));
        self
    }

    pub fn path(&self) -> Result<String> {
        collection_path(&self.workspace_id)
    }

    /// Build the POST descriptor. `pid` and `uid` always win over same-named options.
    pub fn to_request(&self) -> ApiRequest {
        let mut attributes = self.options.clone();
        attributes.insert("pid".to_string(), json!(self.project_id));
        attributes.insert("uid".to_string(), json!(self.user_id));
        ApiRequest::with_body(
            Method::Post,
            project_user_body(attributes, self.fields.as_deref()),
        )
    }
}

/// Add several users to one project in a single call
#[derive(Debug, Clone, PartialEq)]
pub struct AddProjectUsers {
    pub project_id: Id,
    pub user_ids: Vec<Id>,
    pub workspace_id: Id,
    pub options: Param,
    pub fields: Option<Vec<String>>,
}

impl AddProjectUsers {
    pub fn new<I>(project_id: impl Into<Id>, user_ids: I, workspace_id: impl Into<Id>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Id>,
    {
        AddProjectUsers {
            project_id: project_id.into(),
            user_ids: user_ids.into_iter().map(Into::into).collect(),
            workspace_id: workspace_id.into(),
            options: Param::new(),
            fields: None,
        }
    }

    pub fn with_options(mut self, options: Param) -> Self {
        self.options = options;
        self
    }

    pub fn with_option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(collect_fields(fields));
        self
    }

    /// The equivalent single-user request, with the user IDs joined into `uid`
    pub fn to_single(&self) -> AddProjectUser {
        AddProjectUser {
            project_id: self.project_id.clone(),
            user_id: join_ids(&self.user_ids),
            workspace_id: self.workspace_id.clone(),
            options: self.options.clone(),
            fields: self.fields.clone(),
        }
    }
}

/// Change the attributes of one project user (or a pre-joined list of them)
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProjectUser {
    pub id: Id,
    pub workspace_id: Id,
    pub options: Param,
    pub fields: Option<Vec<String>>,
}

impl UpdateProjectUser {
    /// An update always carries the attributes to change
    pub fn new(id: impl Into<Id>, workspace_id: impl Into<Id>, options: Param) -> Self {
        UpdateProjectUser {
            id: id.into(),
            workspace_id: workspace_id.into(),
            options,
            fields: None,
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(collect_fields(fields));
        self
    }

    pub fn path(&self) -> Result<String> {
        item_path(&self.workspace_id, &self.id)
    }

    pub fn to_request(&self) -> ApiRequest {
        ApiRequest::with_body(
            Method::Put,
            project_user_body(self.options.clone(), self.fields.as_deref()),
        )
    }
}

/// Apply the same attribute change to several project users
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProjectUsers {
    pub ids: Vec<Id>,
    pub workspace_id: Id,
    pub options: Param,
    pub fields: Option<Vec<String>>,
}

impl UpdateProjectUsers {
    pub fn new<I>(ids: I, workspace_id: impl Into<Id>, options: Param) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Id>,
    {
        UpdateProjectUsers {
            ids: ids.into_iter().map(Into::into).collect(),
            workspace_id: workspace_id.into(),
            options,
            fields: None,
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(collect_fields(fields));
        self
    }

    /// The equivalent single update, with the IDs joined into the path
    pub fn to_single(&self) -> UpdateProjectUser {
        UpdateProjectUser {
            id: join_ids(&self.ids),
            workspace_id: self.workspace_id.clone(),
            options: self.options.clone(),
            fields: self.fields.clone(),
        }
    }
}

/// Path and descriptor of a project user deletion; deletes carry no body
pub fn delete_request(id: &Id, workspace_id: &Id) -> Result<(String, ApiRequest)> {
    Ok((item_path(workspace_id, id)?, ApiRequest::new(Method::Delete)))
}

/// Project user operations over a [`Transport`]
#[derive(Debug, Clone)]
pub struct ProjectUsers<T> {
    transport: T,
}

impl<T: Transport> ProjectUsers<T> {
    pub fn new(transport: T) -> Self {
        ProjectUsers { transport }
    }

    /// All project users of a workspace
    pub fn list_project_users(&self, workspace_id: impl Into<Id>) -> Result<Vec<ProjectUser>> {
        let workspace_id = workspace_id.into();
        debug!("listing project users of workspace {}", workspace_id);
        let path = collection_path(&workspace_id)?;
        let response = self
            .transport
            .api_request(&path, ApiRequest::new(Method::Get))?;
        records(response)
    }

    /// Add a user to a project
    pub fn add_project_user(&self, request: &AddProjectUser) -> Result<ProjectUser> {
        debug!(
            "adding user {} to project {}",
            request.user_id, request.project_id
        );
        let response = self
            .transport
            .api_request(&request.path()?, request.to_request())?;
        response.into_data().apply()
    }

    /// Add several users to a project in one call
    pub fn add_project_users(&self, request: &AddProjectUsers) -> Result<Vec<ProjectUser>> {
        debug!(
            "adding {} users to project {}",
            request.user_ids.len(),
            request.project_id
        );
        let single = request.to_single();
        let response = self
            .transport
            .api_request(&single.path()?, single.to_request())?;
        records(response)
    }

    /// Change a project user's attributes
    pub fn update_project_user(&self, request: &UpdateProjectUser) -> Result<ProjectUser> {
        debug!("updating project user {}", request.id);
        let response = self
            .transport
            .api_request(&request.path()?, request.to_request())?;
        response.into_data().apply()
    }

    /// Change the attributes of several project users in one call
    pub fn update_project_users(&self, request: &UpdateProjectUsers) -> Result<Vec<ProjectUser>> {
        debug!("updating {} project users", request.ids.len());
        let single = request.to_single();
        let response = self
            .transport
            .api_request(&single.path()?, single.to_request())?;
        records(response)
    }

    /// Remove a project user
    pub fn delete_project_user(&self, id: impl Into<Id>, workspace_id: impl Into<Id>) -> Result<()> {
        let id = id.into();
        debug!("deleting project user {}", id);
        let (path, request) = delete_request(&id, &workspace_id.into())?;
        self.transport.api_request(&path, request)?;
        Ok(())
    }

    /// Remove several project users in one call
    pub fn delete_project_users<I>(&self, ids: I, workspace_id: impl Into<Id>) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Id>,
    {
        self.delete_project_user(join_ids(ids), workspace_id)
    }
}
