//! Futures-returning project user operations, enabled by the `async` feature.
//!
//! Each call runs the blocking operation on tokio's blocking pool, so calls
//! can be issued concurrently from async code. Completion order is whatever
//! the API answers with.

use crate::error::{Result, TogglError};
use crate::project_users::{
    AddProjectUser, AddProjectUsers, ProjectUser, ProjectUsers, UpdateProjectUser, UpdateProjectUsers,
};
use crate::request::{join_ids, Id, Transport};
use std::sync::Arc;

/// Async handle for project user operations
pub struct AsyncProjectUsers<T> {
    transport: Arc<T>,
}

impl<T> Clone for AsyncProjectUsers<T> {
    fn clone(&self) -> Self {
        AsyncProjectUsers {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> AsyncProjectUsers<T>
where
    T: Transport + Send + Sync + 'static,
{
    pub fn new(transport: T) -> Self {
        AsyncProjectUsers {
            transport: Arc::new(transport),
        }
    }

    pub fn from_arc(transport: Arc<T>) -> Self {
        AsyncProjectUsers { transport }
    }

    async fn run<R, F>(&self, op: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(ProjectUsers<Arc<T>>) -> Result<R> + Send + 'static,
    {
        let users = ProjectUsers::new(Arc::clone(&self.transport));
        tokio::task::spawn_blocking(move || op(users))
            .await
            .map_err(|e| TogglError::Other(format!("blocking task failed: {}", e)))?
    }

    pub async fn list_project_users(&self, workspace_id: impl Into<Id>) -> Result<Vec<ProjectUser>> {
        let workspace_id = workspace_id.into();
        self.run(move |users| users.list_project_users(workspace_id)).await
    }

    pub async fn add_project_user(&self, request: AddProjectUser) -> Result<ProjectUser> {
        self.run(move |users| users.add_project_user(&request)).await
    }

    pub async fn add_project_users(&self, request: AddProjectUsers) -> Result<Vec<ProjectUser>> {
        self.run(move |users| users.add_project_users(&request)).await
    }

    pub async fn update_project_user(&self, request: UpdateProjectUser) -> Result<ProjectUser> {
        self.run(move |users| users.update_project_user(&request)).await
    }

    pub async fn update_project_users(&self, request: UpdateProjectUsers) -> Result<Vec<ProjectUser>> {
        self.run(move |users| users.update_project_users(&request)).await
    }

    pub async fn delete_project_user(&self, id: impl Into<Id>, workspace_id: impl Into<Id>) -> Result<()> {
        let (id, workspace_id) = (id.into(), workspace_id.into());
        self.run(move |users| users.delete_project_user(id, workspace_id)).await
    }

    pub async fn delete_project_users<I>(&self, ids: I, workspace_id: impl Into<Id>) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Id>,
    {
        self.delete_project_user(join_ids(ids), workspace_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ApiRequest, Method};
    use crate::response::Response;
    use crate::test_support::RecordingTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_concurrent_deletes_are_independent() {
        let transport = Arc::new(RecordingTransport::replying(Response::empty(200)));
        let users = AsyncProjectUsers::from_arc(Arc::clone(&transport));

        let (a, b) = tokio::join!(
            users.delete_project_user(1u64, 5u64),
            users.delete_project_users([2u64, 3u64], 5u64)
        );
        a.unwrap();
        b.unwrap();

        let mut paths: Vec<String> = transport.calls().into_iter().map(|(path, _)| path).collect();
        paths.sort();
        assert_eq!(
            paths,
            vec![
                "workspaces/5/project_users/1".to_string(),
                "workspaces/5/project_users/2,3".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_async_add_project_users() {
        let transport = Arc::new(RecordingTransport::replying(Response::new(
            200,
            Some(json!({"data": [{"id": 1, "project_id": 10, "user_id": 20}]})),
        )));
        let users = AsyncProjectUsers::from_arc(Arc::clone(&transport));

        let added = users
            .add_project_users(AddProjectUsers::new(10u64, [20u64], 5u64))
            .await
            .unwrap();

        assert_eq!(added.len(), 1);
        assert_eq!(
            transport.calls()[0],
            (
                "workspaces/5/project_users".to_string(),
                ApiRequest::with_body(Method::Post, json!({"project_user": {"pid": 10, "uid": "20"}}))
            )
        );
    }

    #[tokio::test]
    async fn test_async_error_passes_through() {
        let users = AsyncProjectUsers::new(RecordingTransport::failing(403, "\"Forbidden\""));
        let err = users
            .update_project_user(UpdateProjectUser::new(1u64, 5u64, Default::default()))
            .await
            .unwrap_err();
        assert!(err.is_permission_denied());
    }
}
