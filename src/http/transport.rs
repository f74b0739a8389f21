//! Transport seam for the HTTP helper.
//!
//! DESIGN
//! ======
//! `Api` never talks to `reqwest` directly; it goes through `HttpTransport`
//! so tests can script responses. `ReqwestTransport` is the production
//! implementation. Pure body parsing lives in `parse_body` for testability.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use super::types::{HttpError, HttpRequest};
use crate::config::HttpTimeouts;

/// The injected HTTP client. Implementations return the decoded JSON body.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue `request` and decode the response body.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] when the request fails, the status is not a
    /// success, or the body is not JSON.
    async fn send(&self, request: &HttpRequest) -> Result<Value, HttpError>;
}

#[async_trait::async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn send(&self, request: &HttpRequest) -> Result<Value, HttpError> {
        (**self).send(request).await
    }
}

// =============================================================================
// REQWEST
// =============================================================================

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client with no timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ClientBuild`] if the TLS backend cannot initialise.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeouts(HttpTimeouts::default())
    }

    /// Build a client applying whichever timeouts are set.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::ClientBuild`] if the TLS backend cannot initialise.
    pub fn with_timeouts(timeouts: HttpTimeouts) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = timeouts.connect_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| HttpError::ClientBuild(e.to_string()))?;
        Ok(Self { http })
    }

    #[must_use]
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<Value, HttpError> {
        let mut builder = self.http.request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| HttpError::Request(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| HttpError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(HttpError::Status { status: status.as_u16(), body: text });
        }

        parse_body(&text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Decode a response body. An empty body is `Value::Null`.
pub(crate) fn parse_body(text: &str) -> Result<Value, HttpError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| HttpError::Decode(e.to_string()))
}
