//! The HTTP client wrapper.
//!
//! # Design
//! `HttpClient` holds an immutable `ClientConfig` and a shared `Transport`.
//! Every verb funnels through `request`, which resolves headers, sends the
//! request, and interprets the response:
//!
//! 1. defaults, then per-call headers, later wins per name;
//! 2. `Content-Type` defaults to JSON when absent;
//! 3. the request transform, if any, replaces the header set;
//! 4. the transport round-trip;
//! 5. `on_response`;
//! 6. the response transform, which may short-circuit;
//! 7. status / content-type driven interpretation.
//!
//! Nothing is mutated between calls, so concurrent calls on one client need
//! no coordination.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ClientError, ErrorBody, ErrorResponse};
use crate::http::{Body, FormData, HttpMethod, HttpRequest, HttpResponse, JSON_CONTENT_TYPE, OCTET_STREAM};
use crate::transport::Transport;
use crate::types::{Reply, RequestOptions};

/// JSON/binary HTTP client, generic over the error payload `E`.
pub struct HttpClient<E = ErrorBody> {
    config: Arc<ClientConfig<E>>,
    transport: Arc<dyn Transport>,
    _payload: PhantomData<fn() -> E>,
}

impl<E> Clone for HttpClient<E> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
            _payload: PhantomData,
        }
    }
}

impl<E> fmt::Debug for HttpClient<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient").field("config", &self.config).finish_non_exhaustive()
    }
}

#[cfg(feature = "reqwest")]
impl<E: DeserializeOwned> HttpClient<E> {
    /// Client over a fresh `ReqwestTransport`.
    pub fn with_reqwest(config: ClientConfig<E>) -> Self {
        Self::new(config, crate::transport::ReqwestTransport::new())
    }
}

impl<E: DeserializeOwned> HttpClient<E> {
    pub fn new(config: ClientConfig<E>, transport: impl Transport + 'static) -> Self {
        Self::with_shared_transport(config, Arc::new(transport))
    }

    pub fn with_shared_transport(config: ClientConfig<E>, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            _payload: PhantomData,
        }
    }

    pub fn config(&self) -> &ClientConfig<E> {
        &self.config
    }

    /// Send `options` to `base_url + path` and interpret the response.
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Reply<T>, ClientError<E>> {
        let RequestOptions { method, headers, body } = options;
        let request = HttpRequest {
            method,
            url: format!("{}{}", self.config.base_url, path),
            headers: self.resolve_headers(headers, &body),
            body,
        };

        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.send(request).await.map_err(ClientError::Transport)?;
        tracing::debug!(status = response.status, "response received");

        if let Some(on_response) = &self.config.on_response {
            on_response(&response);
        }

        if let Some(transform) = &self.config.transform_response {
            let transformed = transform(&response).await.map_err(ClientError::Transform)?;
            match transformed {
                None => {}
                Some(Reply::Json(value)) if is_no_value(&value) => {}
                Some(Reply::Json(value)) => {
                    tracing::debug!("response transform supplied the result");
                    return serde_json::from_value(value).map(Reply::Json).map_err(ClientError::Decode);
                }
                Some(Reply::Binary(bytes)) => {
                    tracing::debug!("response transform supplied the result");
                    return Ok(Reply::Binary(bytes));
                }
            }
        }

        self.interpret(response)
    }

    /// GET `path`. `options.method` and `options.body` are ignored; only the
    /// headers are used.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<Reply<T>, ClientError<E>> {
        self.request(path, options.method(HttpMethod::Get).body(Body::Empty)).await
    }

    /// POST `body` as JSON; `None` sends `{}`.
    pub async fn post<T, B>(&self, path: &str, body: Option<&B>, options: RequestOptions) -> Result<Reply<T>, ClientError<E>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(HttpMethod::Post, path, body, options).await
    }

    /// POST a pre-encoded multipart payload without touching it.
    ///
    /// Unlike the other verbs, a missing `Content-Type` defaults to the form's
    /// own multipart content type (with its boundary) rather than JSON.
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: FormData,
        options: RequestOptions,
    ) -> Result<Reply<T>, ClientError<E>> {
        self.request(path, options.method(HttpMethod::Post).body(Body::Form(form))).await
    }

    /// PUT `body` as JSON; `None` sends `{}`.
    pub async fn put<T, B>(&self, path: &str, body: Option<&B>, options: RequestOptions) -> Result<Reply<T>, ClientError<E>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(HttpMethod::Put, path, body, options).await
    }

    /// DELETE with a JSON body; `None` sends `{}`.
    pub async fn delete<T, B>(&self, path: &str, body: Option<&B>, options: RequestOptions) -> Result<Reply<T>, ClientError<E>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(HttpMethod::Delete, path, body, options).await
    }

    async fn send_json<T, B>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<Reply<T>, ClientError<E>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = match body {
            Some(value) => Body::json(value),
            None => Body::json(&serde_json::json!({})),
        }
        .map_err(ClientError::Encode)?;
        self.request(path, options.method(method).body(body)).await
    }

    fn resolve_headers(&self, per_call: HeaderMap, body: &Body) -> HeaderMap {
        let mut headers = self.config.headers.clone();
        headers.extend(per_call);

        if !headers.contains_key(CONTENT_TYPE) {
            let default = match body {
                Body::Form(form) => HeaderValue::from_str(form.content_type()).ok(),
                _ => None,
            };
            let value = default.unwrap_or_else(|| HeaderValue::from_static(JSON_CONTENT_TYPE));
            headers.insert(CONTENT_TYPE, value);
        }

        match &self.config.transform_request {
            Some(transform) => transform(headers),
            None => headers,
        }
    }

    fn interpret<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Reply<T>, ClientError<E>> {
        if !response.is_success() {
            let data: E = response.json().map_err(ClientError::Decode)?;
            let status = response.status;
            if let Some(on_error) = &self.config.on_error {
                on_error(&data, status, &response);
            }
            tracing::warn!(status, "request failed");
            return Err(ClientError::Status(ErrorResponse { status, data }));
        }

        if response.content_type() == Some(OCTET_STREAM) {
            return Ok(Reply::Binary(response.body));
        }

        response.json().map(Reply::Json).map_err(ClientError::Decode)
    }
}

/// `null`, `false`, `0` and `""` count as "no value" from a response transform.
fn is_no_value(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(flag) => !flag,
        serde_json::Value::Number(number) => number.as_f64() == Some(0.0),
        serde_json::Value::String(text) => text.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => false,
    }
}
