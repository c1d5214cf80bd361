//! Scripted transport for exercising the client without a network.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use super::{RawResponse, Transport};
use crate::error::Result;

pub(crate) fn ok_json(value: serde_json::Value) -> RawResponse {
    RawResponse {
        status: 200,
        retry_after: None,
        body: value.to_string(),
    }
}

pub(crate) fn status_response(status: u16, body: &str) -> RawResponse {
    RawResponse {
        status,
        retry_after: None,
        body: body.to_string(),
    }
}

pub(crate) fn rate_limited(retry_after: Option<u64>) -> RawResponse {
    RawResponse {
        status: 429,
        retry_after,
        body: "rate limit exceeded".to_string(),
    }
}

/// A [`Transport`] that serves queued responses per endpoint and records
/// every call and backoff sleep instead of performing them.
#[derive(Default)]
pub(crate) struct StubTransport {
    routes: Mutex<HashMap<String, VecDeque<RawResponse>>>,
    calls: Mutex<Vec<String>>,
    sleeps: Mutex<Vec<Duration>>,
}

impl StubTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue the next response for an exact endpoint string.
    pub(crate) fn on(&self, endpoint: &str, response: RawResponse) {
        self.routes
            .lock()
            .unwrap()
            .entry(endpoint.to_string())
            .or_default()
            .push_back(response);
    }

    /// Endpoints hit so far, in call order.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Backoff delays requested so far, in order.
    pub(crate) fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Transport for StubTransport {
    async fn get(&self, endpoint: &str) -> Result<RawResponse> {
        self.calls.lock().unwrap().push(endpoint.to_string());
        let response = self
            .routes
            .lock()
            .unwrap()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front);
        match response {
            Some(response) => Ok(response),
            None => panic!("no scripted response left for {endpoint}"),
        }
    }

    async fn sleep(&self, delay: Duration) {
        self.sleeps.lock().unwrap().push(delay);
    }
}
