//! Scripted transport for tests.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use studypulse_core::ApiError;

use crate::transport::{ApiRequest, ApiResponse, ApiTransport, HttpMethod};

type Key = (HttpMethod, String);

/// Replays canned responses keyed by method and path and records every request.
///
/// Responses queued for the same route are returned in order; the last one
/// repeats. Unscripted routes fail with a transport error.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<Key, VecDeque<Result<ApiResponse, ApiError>>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a JSON response for `method path`.
    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: serde_json::Value) {
        self.push(method, path, Ok(ApiResponse::new(status, body.to_string())));
    }

    /// Queues a raw body for `method path`.
    pub fn respond_raw(&self, method: HttpMethod, path: &str, status: u16, body: &str) {
        self.push(method, path, Ok(ApiResponse::new(status, body)));
    }

    /// Queues a network failure for `method path`.
    pub fn fail(&self, method: HttpMethod, path: &str) {
        self.push(
            method,
            path,
            Err(ApiError::Transport(format!("connection refused: {}", path))),
        );
    }

    fn push(&self, method: HttpMethod, path: &str, response: Result<ApiResponse, ApiError>) {
        self.routes
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    /// All requests sent so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// Paths of all requests sent so far, as `"METHOD /path"`.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method.as_str(), r.path))
            .collect()
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let key = (request.method, request.path.clone());
        self.requests
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(request);

        let mut routes = self.routes.lock().unwrap_or_else(|p| p.into_inner());
        match routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_else(|| {
                Err(ApiError::Transport("empty script".to_string()))
            }),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Err(ApiError::Transport("empty script".to_string()))),
            None => Err(ApiError::Transport(format!(
                "no scripted response for {} {}",
                key.0.as_str(),
                key.1
            ))),
        }
    }
}
