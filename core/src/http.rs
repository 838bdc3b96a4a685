//! HTTP transport types shared between the client and its transport.
//!
//! # Design
//! Requests and responses are plain data. `HttpClient` resolves everything
//! (URL, merged headers, encoded body) into an `HttpRequest` before handing it
//! to a `Transport`, and the transport hands back a fully buffered
//! `HttpResponse`. Interpretation of the response never touches the network,
//! so it can be exercised with canned responses.
//!
//! Headers use `http::HeaderMap` so name lookups are case-insensitive, the
//! same way a fetch `Headers` object behaves.

use std::fmt;

use bytes::Bytes;
use http::header::{HeaderMap, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Content type applied to requests that do not set one.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Response content type that selects the binary branch.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A multipart payload encoded by the caller.
///
/// The client never looks inside: `content_type` must carry the boundary the
/// bytes were encoded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormData {
    content_type: String,
    bytes: Bytes,
}

impl FormData {
    pub fn new(content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }
}

/// Request payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    #[default]
    Empty,
    /// Already-encoded JSON text.
    Json(String),
    Bytes(Bytes),
    Form(FormData),
}

impl Body {
    /// JSON-encode `value`.
    pub fn json<B: Serialize + ?Sized>(value: &B) -> Result<Self, serde_json::Error> {
        serde_json::to_string(value).map(Body::Json)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Body::Empty)
    }

    /// The raw bytes that go on the wire, if any.
    pub fn to_bytes(&self) -> Option<Bytes> {
        match self {
            Body::Empty => None,
            Body::Json(text) => Some(Bytes::copy_from_slice(text.as_bytes())),
            Body::Bytes(bytes) => Some(bytes.clone()),
            Body::Form(form) => Some(form.bytes.clone()),
        }
    }
}

/// A fully resolved request, ready for a `Transport`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Body,
}

/// A completed response with its body already buffered.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Status in `[200, 300)`.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `Content-Type` header, if present and valid UTF-8.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    pub fn bytes(&self) -> Bytes {
        self.body.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn method_tokens_are_upper_case() {
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }

    #[test]
    fn body_json_encodes_value() {
        let body = Body::json(&serde_json::json!({"a": 1})).unwrap();
        assert_eq!(body, Body::Json(r#"{"a":1}"#.to_string()));
        assert_eq!(body.to_bytes().unwrap(), Bytes::from_static(br#"{"a":1}"#));
    }

    #[test]
    fn empty_body_has_no_bytes() {
        assert!(Body::Empty.is_empty());
        assert!(Body::Empty.to_bytes().is_none());
    }

    #[test]
    fn form_body_is_passed_through() {
        let form = FormData::new("multipart/form-data; boundary=x", &b"--x\r\n"[..]);
        let body = Body::Form(form.clone());
        assert_eq!(body.to_bytes().unwrap(), form.bytes().clone());
    }

    #[test]
    fn success_range_is_half_open() {
        let ok = |status| HttpResponse::new(status, HeaderMap::new(), Bytes::new()).is_success();
        assert!(!ok(199));
        assert!(ok(200));
        assert!(ok(299));
        assert!(!ok(300));
    }

    #[test]
    fn content_type_lookup_ignores_name_case() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static(OCTET_STREAM));
        let response = HttpResponse::new(200, headers, Bytes::new());
        assert_eq!(response.content_type(), Some(OCTET_STREAM));
    }

    #[test]
    fn json_reports_malformed_body() {
        let response = HttpResponse::new(200, HeaderMap::new(), "not json");
        assert!(response.json::<serde_json::Value>().is_err());
    }
}
