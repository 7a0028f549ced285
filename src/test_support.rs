//! In-memory transport for unit tests.

use crate::error::{Result, TogglError};
use crate::request::{ApiRequest, Transport};
use crate::response::Response;
use std::sync::Mutex;

enum Reply {
    Ok(Response),
    Err { status: u16, body: String },
}

/// Records every request and answers each one with the same canned reply
pub(crate) struct RecordingTransport {
    reply: Reply,
    calls: Mutex<Vec<(String, ApiRequest)>>,
}

impl RecordingTransport {
    pub(crate) fn replying(response: Response) -> Self {
        RecordingTransport {
            reply: Reply::Ok(response),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(status: u16, body: &str) -> Self {
        RecordingTransport {
            reply: Reply::Err {
                status,
                body: body.to_string(),
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<(String, ApiRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    fn api_request(&self, path: &str, request: ApiRequest) -> Result<Response> {
        self.calls.lock().unwrap().push((path.to_string(), request));
        match &self.reply {
            Reply::Ok(response) => Ok(response.clone()),
            Reply::Err { status, body } => Err(TogglError::api(*status, body, None)),
        }
    }
}
