//! Scripted transports shared by the HTTP and domain-fetch tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;
use tokio::sync::oneshot;

use super::transport::HttpTransport;
use super::types::{HttpError, HttpRequest};

/// Replays queued results in order and records every request it sees.
/// Once the queue is empty it answers `Ok(Value::Null)`.
pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Result<Value, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub(crate) fn new(responses: Vec<Result<Value, HttpError>>) -> Self {
        Self { responses: Mutex::new(responses.into()), requests: Mutex::new(Vec::new()) }
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: &HttpRequest) -> Result<Value, HttpError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses.lock().unwrap().pop_front().unwrap_or(Ok(Value::Null))
    }
}

/// Holds each request open until the test releases it through a oneshot.
pub(crate) struct GatedTransport {
    gates: Mutex<VecDeque<oneshot::Receiver<Result<Value, HttpError>>>>,
}

impl GatedTransport {
    /// Returns the transport plus one release handle per expected request.
    pub(crate) fn new(count: usize) -> (Self, Vec<oneshot::Sender<Result<Value, HttpError>>>) {
        let mut gates = VecDeque::with_capacity(count);
        let mut releases = Vec::with_capacity(count);
        for _ in 0..count {
            let (tx, rx) = oneshot::channel();
            gates.push_back(rx);
            releases.push(tx);
        }
        (Self { gates: Mutex::new(gates) }, releases)
    }
}

#[async_trait::async_trait]
impl HttpTransport for GatedTransport {
    async fn send(&self, _request: &HttpRequest) -> Result<Value, HttpError> {
        let gate = self.gates.lock().unwrap().pop_front();
        match gate {
            Some(rx) => rx.await.unwrap_or_else(|_| Err(HttpError::Request("gate dropped".into()))),
            None => Err(HttpError::Request("no gate left".into())),
        }
    }
}
