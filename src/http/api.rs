//! Tracked HTTP helper.
//!
//! ERROR HANDLING
//! ==============
//! `fetch` returns a `Result` for helpers layered on top. The sentinel forms
//! (`fetch_data`, `get`, `post`) never fail: the error is recorded in
//! `state`, logged, and the caller receives `None`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::Value;
use tracing::{debug, error};

use super::transport::HttpTransport;
use super::types::{HttpError, HttpRequest, Method, RequestOptions, RequestState};
use crate::reactive::Observable;

pub struct Api<T> {
    transport: T,
    state: Observable<RequestState>,
    data: Observable<Option<Value>>,
}

impl<T: HttpTransport> Api<T> {
    pub fn new(transport: T) -> Self {
        Self { transport, state: Observable::default(), data: Observable::default() }
    }

    pub fn state(&self) -> &Observable<RequestState> {
        &self.state
    }

    /// Body of the last successful response.
    pub fn data(&self) -> &Observable<Option<Value>> {
        &self.data
    }

    pub fn loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn error(&self) -> Option<HttpError> {
        self.state.with(|s| s.error.clone())
    }

    /// Issue one request, tracking loading/error state around it.
    ///
    /// # Errors
    ///
    /// Returns the transport's [`HttpError`]; the same error is stored in `state`.
    pub async fn fetch(&self, url: &str, options: RequestOptions) -> Result<Value, HttpError> {
        self.execute(options.into_request(url, Method::Get, None)).await
    }

    /// Sentinel form of [`Api::fetch`].
    pub async fn fetch_data(&self, url: &str, options: RequestOptions) -> Option<Value> {
        self.fetch(url, options).await.ok()
    }

    /// `GET url`, unless `options` names another method.
    pub async fn get(&self, url: &str, options: RequestOptions) -> Option<Value> {
        self.execute(options.into_request(url, Method::Get, None)).await.ok()
    }

    /// `POST url` with `payload`; `options` may override either.
    pub async fn post(&self, url: &str, payload: Value, options: RequestOptions) -> Option<Value> {
        self.execute(options.into_request(url, Method::Post, Some(payload)))
            .await
            .ok()
    }

    async fn execute(&self, request: HttpRequest) -> Result<Value, HttpError> {
        self.state.set(RequestState::started());
        let _loading = self.state.reset_on_drop(|s| s.loading = false);

        debug!(method = request.method.as_str(), url = %request.url, "http request");
        match self.transport.send(&request).await {
            Ok(body) => {
                self.data.set(Some(body.clone()));
                Ok(body)
            }
            Err(e) => {
                error!(error = %e, method = request.method.as_str(), url = %request.url, "API error");
                self.state.update(|s| s.error = Some(e.clone()));
                Err(e)
            }
        }
    }
}
