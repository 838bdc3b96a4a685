//! Minimal JSON/binary HTTP client wrapper.
//!
//! # Overview
//! `HttpClient` standardizes how requests are built and how responses are
//! read: default and per-call headers are merged, `Content-Type` defaults to
//! JSON, 2xx bodies are decoded as JSON (or returned raw for
//! `application/octet-stream`), and anything else becomes a structured
//! `ClientError::Status` carrying the decoded error payload.
//!
//! # Design
//! - The network is behind the `Transport` trait; `ReqwestTransport` (feature
//!   `reqwest`, on by default) is the stock implementation.
//! - `ClientConfig` is immutable once built; hooks (`transform_request`,
//!   `transform_response`, `on_response`, `on_error`) are per client.
//! - The error payload type is a type parameter, defaulting to `ErrorBody`.
//! - No retries, timeouts, pooling or auth: those belong to the transport or
//!   the caller.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::HttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{BoxError, ClientError, ErrorBody, ErrorResponse};
pub use self::http::{Body, FormData, HttpMethod, HttpRequest, HttpResponse, JSON_CONTENT_TYPE, OCTET_STREAM};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::Transport;
pub use types::{Reply, RequestOptions};
