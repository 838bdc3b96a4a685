//! Per-call request options and the success value of a call.

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};

use crate::http::{Body, HttpMethod};

/// Options for a single call.
///
/// Headers here are merged over the client's defaults, winning per name.
/// The verb methods (`post`, `put`, `delete`) set method and body
/// themselves; only `request` honours `method` and `body` from here.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: HeaderMap,
    pub body: Body,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Set one header, replacing any earlier value for the same name.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Merge `headers` in, later values winning per name.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }
}

/// What a successful call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// The decoded JSON body.
    Json(T),
    /// The raw body of an `application/octet-stream` response.
    Binary(Bytes),
}

impl<T> Reply<T> {
    pub fn is_binary(&self) -> bool {
        matches!(self, Reply::Binary(_))
    }

    pub fn into_json(self) -> Option<T> {
        match self {
            Reply::Json(value) => Some(value),
            Reply::Binary(_) => None,
        }
    }

    pub fn into_binary(self) -> Option<Bytes> {
        match self {
            Reply::Json(_) => None,
            Reply::Binary(bytes) => Some(bytes),
        }
    }
}
