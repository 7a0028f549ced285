use serde_json::Value;

/// Response represents a successful Toggl API response.
/// It carries the decoded JSON payload (if any) and provides methods to access it.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code
    pub status: u16,

    /// Decoded JSON payload, `None` for empty bodies (e.g. deletes)
    pub data: Option<Value>,

    /// Request id header from the HTTP response
    pub request_id: Option<String>,
}

impl Response {
    /// Create a response with a payload
    pub fn new(status: u16, data: Option<Value>) -> Self {
        Response {
            status,
            data,
            request_id: None,
        }
    }

    /// Response without a payload
    pub fn empty(status: u16) -> Self {
        Response::new(status, None)
    }

    /// Get the raw data value from the response
    pub fn raw(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Apply unmarshals the response data into the provided type
    pub fn apply<T>(&self) -> Result<T, crate::error::TogglError>
    where
        T: serde::de::DeserializeOwned,
    {
        match &self.data {
            Some(data) => serde_json::from_value(data.clone()).map_err(|e| e.into()),
            None => serde_json::from_value(Value::Null).map_err(|e| e.into()),
        }
    }

    /// Unwrap the `{"data": ...}` envelope batch endpoints may answer with.
    /// Payloads without the envelope are returned unchanged.
    pub fn into_data(self) -> Response {
        let data = match self.data {
            Some(Value::Object(mut map)) if map.contains_key("data") => map.remove("data"),
            other => other,
        };
        Response { data, ..self }
    }

    /// Get a value from the response data by a slash-separated path.
    /// For example, "0/project_id" accesses "project_id" of the first record.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let mut current = self.data.as_ref()?;

        for part in parts {
            current = match current {
                Value::Object(map) => map.get(part)?,
                Value::Array(arr) => {
                    let index: usize = part.parse().ok()?;
                    arr.get(index)?
                }
                _ => return None,
            };
        }

        Some(current)
    }

    /// Get a string value from the response data by a slash-separated path
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.get(path).and_then(|v| v.as_str().map(|s| s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_response_get() {
        let response = Response::new(200, Some(json!({"project_user": {"rate": "12.5"}})));
        assert_eq!(response.get_string("project_user/rate"), Some("12.5".to_string()));
        assert_eq!(response.get("project_user/missing"), None);
    }

    #[test]
    fn test_response_get_array_index() {
        let response = Response::new(200, Some(json!([{"id": 1}, {"id": 2}])));
        assert_eq!(response.get("1/id"), Some(&json!(2)));
        assert_eq!(response.get("x/id"), None);
    }

    #[test]
    fn test_response_apply() {
        #[derive(Deserialize)]
        struct Record {
            id: u64,
        }

        let response = Response::new(200, Some(json!({"id": 9})));
        let record: Record = response.apply().unwrap();
        assert_eq!(record.id, 9);
    }

    #[test]
    fn test_response_apply_empty_as_unit() {
        let response = Response::empty(200);
        let unit: crate::error::Result<()> = response.apply();
        assert!(unit.is_ok());
    }

    #[test]
    fn test_into_data_unwraps_envelope() {
        let response = Response::new(200, Some(json!({"data": [{"id": 1}, {"id": 2}]})));
        let unwrapped = response.into_data();
        assert_eq!(unwrapped.data, Some(json!([{"id": 1}, {"id": 2}])));
        assert_eq!(unwrapped.status, 200);
    }

    #[test]
    fn test_into_data_passes_bare_payload() {
        let response = Response::new(200, Some(json!([{"id": 1}])));
        assert_eq!(response.clone().into_data(), response);

        let empty = Response::empty(200);
        assert_eq!(empty.clone().into_data(), empty);
    }
}
