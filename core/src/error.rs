//! Error payloads and the client error type.
//!
//! # Design
//! A non-2xx response is an application error: its body is decoded into the
//! caller's payload type `E` and surfaced as `ClientError::Status`. Every other
//! failure (the transport, a malformed body) is passed through with its
//! original error kept as the `source`.

use serde::{Deserialize, Serialize};

/// Boxed error used at the transport seam.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Default error payload returned by JSON APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: i64,
    pub message: String,
}

/// A non-2xx response: the status code and the decoded body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse<E = ErrorBody> {
    pub status: u16,
    pub data: E,
}

/// Errors returned by `HttpClient`.
#[derive(Debug, thiserror::Error)]
pub enum ClientError<E = ErrorBody> {
    /// The server answered outside `[200, 300)`.
    #[error("request failed with status {}", .0.status)]
    Status(ErrorResponse<E>),

    /// The transport could not complete the round-trip.
    #[error("transport error")]
    Transport(#[source] BoxError),

    /// A response body (or a transformed value) was not the expected JSON.
    #[error("failed to decode response body")]
    Decode(#[source] serde_json::Error),

    /// The request body could not be JSON-encoded.
    #[error("failed to encode request body")]
    Encode(#[source] serde_json::Error),

    /// The configured response transform failed.
    #[error("response transform failed")]
    Transform(#[source] BoxError),
}

impl<E> ClientError<E> {
    /// The HTTP status for application errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status(response) => Some(response.status),
            _ => None,
        }
    }

    pub fn error_response(&self) -> Option<&ErrorResponse<E>> {
        match self {
            ClientError::Status(response) => Some(response),
            _ => None,
        }
    }

    pub fn into_error_response(self) -> Option<ErrorResponse<E>> {
        match self {
            ClientError::Status(response) => Some(response),
            _ => None,
        }
    }
}
