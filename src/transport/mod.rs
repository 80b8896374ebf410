//! Injectable HTTP capability used by the client.
//!
//! The client builds an [`HttpRequest`] and hands it to a [`Transport`]; the
//! transport returns the status, headers and the fully buffered body. Tests
//! plug in a recording fake, production code uses [`ReqwestTransport`].

mod http;

pub use http::{ReqwestTransport, ReqwestTransportBuilder};

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};

/// One outbound request, fully described.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// Pre-serialized JSON document.
    Json(Bytes),
    /// multipart/form-data with a single file field. The transport picks the boundary.
    Multipart(FilePart),
}

impl RequestBody {
    pub fn as_json(&self) -> Option<&Bytes> {
        match self {
            RequestBody::Json(bytes) => Some(bytes),
            RequestBody::Multipart(_) => None,
        }
    }

    pub fn as_multipart(&self) -> Option<&FilePart> {
        match self {
            RequestBody::Multipart(part) => Some(part),
            RequestBody::Json(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field_name: String,
    pub file_name: String,
    pub mime: String,
    pub data: Bytes,
}

/// Response with the body already read to the end.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Execute one HTTP request.
///
/// Implementations are shared across concurrent dispatch calls and must be
/// safe for concurrent use. They must read the response body completely and
/// release the underlying connection before returning, on success and on error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request cancelled")]
    Cancelled,

    #[error("failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid header value: {0}")]
    InvalidHeader(String),

    #[error("Transport error: {0}")]
    Other(String),
}
