//! Fixture HTTP server used to exercise the client over real sockets.
//!
//! Routes cover each branch the client distinguishes: JSON success, binary
//! success, JSON error bodies, and malformed bodies. `/echo` reflects the
//! request back so tests can inspect what actually went over the wire.

use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::Path,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;

/// What `/echo` saw.
#[derive(Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/files/{name}", get(file))
        .route("/status/{code}", get(status))
        .route("/malformed", get(malformed))
        .route("/upload", post(upload))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// JSON error body in the `{code, message}` shape.
fn error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = json!({ "code": status.as_u16(), "message": message.into() });
    (status, Json(body)).into_response()
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    tracing::debug!(%method, len = body.len(), "echo");
    let headers = headers
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect();
    Json(Echo {
        method: method.to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// The file name repeated twice, as raw bytes.
async fn file(Path(name): Path<String>) -> Response {
    if name == "missing" {
        return error(StatusCode::NOT_FOUND, "file not found");
    }
    let bytes = name.repeat(2).into_bytes();
    ([(header::CONTENT_TYPE, "application/octet-stream")], bytes).into_response()
}

async fn status(Path(code): Path<u16>) -> Response {
    tracing::info!(code, "forced status");
    match StatusCode::from_u16(code) {
        Ok(status) => error(status, format!("status {code}")),
        Err(_) => error(StatusCode::BAD_REQUEST, "invalid status code"),
    }
}

async fn malformed() -> Response {
    ([(header::CONTENT_TYPE, "application/json")], "{not json").into_response()
}

async fn upload(headers: HeaderMap, body: Bytes) -> Json<serde_json::Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    Json(json!({ "content_type": content_type, "len": body.len() }))
}
