//! Generic HTTP helper.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` tracks loading/error state around single requests, `transport`
//! defines the injected client seam, and `types` holds the request schema.

pub mod api;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use api::Api;
pub use transport::{HttpTransport, ReqwestTransport};
pub use types::{HttpError, HttpRequest, Method, RequestOptions, RequestState};
