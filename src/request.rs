use crate::error::{Result, TogglError};
use crate::response::Response;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// HTTP method of a Toggl API request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Request descriptor handed to a [`Transport`]: the method and an optional JSON body.
/// The endpoint path travels next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Request without a body
    pub fn new(method: Method) -> Self {
        ApiRequest { method, body: None }
    }

    /// Request carrying a JSON body
    pub fn with_body(method: Method, body: Value) -> Self {
        ApiRequest {
            method,
            body: Some(body),
        }
    }
}

/// Executes request descriptors against the API.
///
/// [`crate::TogglClient`] is the HTTP implementation; resource bindings only
/// ever talk to this trait, so any other executor can be plugged in.
pub trait Transport {
    /// Perform `request` on `path`, relative to the API base URL
    fn api_request(&self, path: &str, request: ApiRequest) -> Result<Response>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn api_request(&self, path: &str, request: ApiRequest) -> Result<Response> {
        (**self).api_request(path, request)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn api_request(&self, path: &str, request: ApiRequest) -> Result<Response> {
        (**self).api_request(path, request)
    }
}

/// Identifier of a Toggl entity. Toggl IDs are numeric, but batch endpoints
/// take several of them joined into one string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Num(u64),
    Str(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Num(n) => write!(f, "{}", n),
            Id::Str(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Id {
    fn from(n: u64) -> Self {
        Id::Num(n)
    }
}

impl From<u32> for Id {
    fn from(n: u32) -> Self {
        Id::Num(n.into())
    }
}

// Unsuffixed integer literals fall back to `i32`. Negative values are never
// valid Toggl IDs; they are kept as text and left for the API to reject.
impl From<i32> for Id {
    fn from(n: i32) -> Self {
        Id::from(i64::from(n))
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        u64::try_from(n)
            .map(Id::Num)
            .unwrap_or_else(|_| Id::Str(n.to_string()))
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::Str(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::Str(s)
    }
}

impl From<&Id> for Id {
    fn from(id: &Id) -> Self {
        id.clone()
    }
}

/// Join IDs into the comma-separated form used by batch endpoints
pub fn join_ids<I>(ids: I) -> Id
where
    I: IntoIterator,
    I::Item: Into<Id>,
{
    let joined = ids
        .into_iter()
        .map(|id| id.into().to_string())
        .collect::<Vec<_>>()
        .join(",");
    Id::Str(joined)
}

/// Render an ID as a single URL path segment.
///
/// Each comma-separated part is percent-encoded on its own, so the batch
/// separator survives while `/`, `?` and `#` cannot leave the segment.
/// `.` and `..` are refused since URL parsing would resolve them.
pub fn path_segment(id: &Id) -> Result<String> {
    let segment = match id {
        Id::Num(n) => n.to_string(),
        Id::Str(s) => s
            .split(',')
            .map(|part| urlencoding::encode(part).into_owned())
            .collect::<Vec<_>>()
            .join(","),
    };

    if segment == "." || segment == ".." {
        return Err(TogglError::RequestBuild(format!(
            "invalid ID path segment: {:?}",
            segment
        )));
    }
    Ok(segment)
}

/// Join a field selector into the comma-separated `fields` value.
/// An empty selector yields `None`.
pub fn join_fields<S: AsRef<str>>(fields: &[S]) -> Option<String> {
    if fields.is_empty() {
        return None;
    }
    Some(
        fields
            .iter()
            .map(|f| f.as_ref())
            .collect::<Vec<_>>()
            .join(","),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_names() {
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(reqwest::Method::from(Method::Delete), reqwest::Method::DELETE);
    }

    #[test]
    fn test_id_serialization() {
        assert_eq!(serde_json::to_value(Id::from(20u64)).unwrap(), json!(20));
        assert_eq!(serde_json::to_value(Id::from("1,2")).unwrap(), json!("1,2"));

        let id: Id = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(id, Id::Num(42));
    }

    #[test]
    fn test_join_ids_mixed() {
        let joined = join_ids(vec![Id::from(1u64), Id::from("2"), Id::from(3u64)]);
        assert_eq!(joined, Id::Str("1,2,3".to_string()));
    }

    #[test]
    fn test_join_ids_single() {
        assert_eq!(join_ids([7u64]), Id::Str("7".to_string()));
    }

    #[test]
    fn test_id_from_unsuffixed_literal() {
        assert_eq!(Id::from(10), Id::Num(10));
        assert_eq!(Id::from(5i64), Id::Num(5));
        assert_eq!(Id::from(-1), Id::Str("-1".to_string()));
    }

    #[test]
    fn test_path_segment_keeps_batch_separator() {
        assert_eq!(path_segment(&Id::from(99u64)).unwrap(), "99");
        assert_eq!(path_segment(&Id::from("1,2,3")).unwrap(), "1,2,3");
    }

    #[test]
    fn test_path_segment_encodes_reserved_characters() {
        assert_eq!(
            path_segment(&Id::from("../../../me")).unwrap(),
            "..%2F..%2F..%2Fme"
        );
        assert_eq!(path_segment(&Id::from("7?x=1#f")).unwrap(), "7%3Fx%3D1%23f");
        assert_eq!(path_segment(&Id::from("1,a/b")).unwrap(), "1,a%2Fb");
    }

    #[test]
    fn test_path_segment_rejects_dot_segments() {
        assert!(matches!(
            path_segment(&Id::from("..")),
            Err(TogglError::RequestBuild(_))
        ));
        assert!(path_segment(&Id::from(".")).is_err());
    }

    #[test]
    fn test_join_fields_keeps_order() {
        assert_eq!(
            join_fields(&["fullname", "email", "at"]),
            Some("fullname,email,at".to_string())
        );
    }

    #[test]
    fn test_join_fields_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(join_fields(&empty), None);
    }
}
