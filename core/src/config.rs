//! Client configuration.
//!
//! # Design
//! `ClientConfig` is built once and never mutated afterwards. Hooks are
//! stored as `Arc<dyn Fn ..>` so the config, and any client holding it, can be
//! cloned and shared across tasks without locking.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use http::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{BoxError, ErrorBody};
use crate::http::HttpResponse;
use crate::types::Reply;

/// Rewrites the merged outgoing headers; the return value is used as is.
pub type TransformRequest = Arc<dyn Fn(HeaderMap) -> HeaderMap + Send + Sync>;

/// Async override of default response interpretation. `Ok(None)` means
/// "no value", and the default interpretation runs.
pub type TransformResponse = Arc<
    dyn for<'a> Fn(&'a HttpResponse) -> BoxFuture<'a, Result<Option<Reply<serde_json::Value>>, BoxError>>
        + Send
        + Sync,
>;

/// Called with every completed response, before any parsing.
pub type OnResponse = Arc<dyn Fn(&HttpResponse) + Send + Sync>;

/// Called with `(payload, status, response)` for non-2xx responses.
pub type OnError<E> = Arc<dyn Fn(&E, u16, &HttpResponse) + Send + Sync>;

/// Immutable configuration owned by an `HttpClient`.
pub struct ClientConfig<E = ErrorBody> {
    pub(crate) base_url: String,
    pub(crate) headers: HeaderMap,
    pub(crate) transform_request: Option<TransformRequest>,
    pub(crate) transform_response: Option<TransformResponse>,
    pub(crate) on_response: Option<OnResponse>,
    pub(crate) on_error: Option<OnError<E>>,
}

impl<E> ClientConfig<E> {
    pub fn builder() -> ClientConfigBuilder<E> {
        ClientConfigBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl<E> Default for ClientConfig<E> {
    fn default() -> Self {
        Self::builder().build()
    }
}

// Hand-written so `E` does not need to be `Clone`.
impl<E> Clone for ClientConfig<E> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            headers: self.headers.clone(),
            transform_request: self.transform_request.clone(),
            transform_response: self.transform_response.clone(),
            on_response: self.on_response.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl<E> fmt::Debug for ClientConfig<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("transform_request", &self.transform_request.is_some())
            .field("transform_response", &self.transform_response.is_some())
            .field("on_response", &self.on_response.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Builder for `ClientConfig`. Every option is optional.
pub struct ClientConfigBuilder<E = ErrorBody> {
    config: ClientConfig<E>,
}

impl<E> Default for ClientConfigBuilder<E> {
    fn default() -> Self {
        Self {
            config: ClientConfig {
                base_url: String::new(),
                headers: HeaderMap::new(),
                transform_request: None,
                transform_response: None,
                on_response: None,
                on_error: None,
            },
        }
    }
}

impl<E> ClientConfigBuilder<E> {
    /// Prefix prepended verbatim to every call path.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Add a default header, replacing any earlier value for the name.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.config.headers.insert(name, value);
        self
    }

    /// Merge a set of default headers, later values winning per name.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.config.headers.extend(headers);
        self
    }

    pub fn transform_request<F>(mut self, f: F) -> Self
    where
        F: Fn(HeaderMap) -> HeaderMap + Send + Sync + 'static,
    {
        self.config.transform_request = Some(Arc::new(f));
        self
    }

    pub fn transform_response<F>(mut self, f: F) -> Self
    where
        F: for<'a> Fn(&'a HttpResponse) -> BoxFuture<'a, Result<Option<Reply<serde_json::Value>>, BoxError>>
            + Send
            + Sync
            + 'static,
    {
        self.config.transform_response = Some(Arc::new(f));
        self
    }

    pub fn on_response<F>(mut self, f: F) -> Self
    where
        F: Fn(&HttpResponse) + Send + Sync + 'static,
    {
        self.config.on_response = Some(Arc::new(f));
        self
    }

    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&E, u16, &HttpResponse) + Send + Sync + 'static,
    {
        self.config.on_error = Some(Arc::new(f));
        self
    }

    pub fn build(self) -> ClientConfig<E> {
        self.config
    }
}
