use super::builder::ShuttleClientBuilder;
use super::payload::Payload;
use crate::transport::{FilePart, HttpRequest, RequestBody, Transport, TransportError};
use crate::{Error, Result};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Public ShuttleAI endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.shuttleai.app";

const UPLOAD_FIELD_NAME: &str = "file";
const UPLOAD_FILE_NAME: &str = "audio.mp3";
const UPLOAD_MIME: &str = "application/octet-stream";

/// Immutable client settings, shared by every dispatch call.
#[derive(Clone)]
pub struct ClientConfig {
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) transport: Arc<dyn Transport>,
}

impl ClientConfig {
    /// Empty means requests are sent without an `Authorization` header.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "<redacted>" })
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Client for the ShuttleAI HTTP API.
///
/// Cheap to clone; clones share the same transport.
#[derive(Debug, Clone)]
pub struct ShuttleClient {
    config: ClientConfig,
}

impl ShuttleClient {
    /// Client with the default base URL and the default reqwest transport.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    pub fn builder() -> ShuttleClientBuilder {
        ShuttleClientBuilder::new()
    }

    pub(crate) fn from_config(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `{base_url}/{task}`. The task is not escaped.
    pub fn resolve_url(&self, task: &str) -> String {
        format!("{}/{}", self.config.base_url, task)
    }

    /// Build the POST request for `task` without sending it.
    ///
    /// `content_type` is set verbatim when non-empty and left unset otherwise.
    pub fn build_request(
        &self,
        task: &str,
        content_type: &str,
        payload: Payload,
    ) -> Result<HttpRequest> {
        let body = match payload {
            Payload::Binary(data) => RequestBody::Multipart(FilePart {
                field_name: UPLOAD_FIELD_NAME.to_string(),
                file_name: UPLOAD_FILE_NAME.to_string(),
                mime: UPLOAD_MIME.to_string(),
                data,
            }),
            Payload::Json(value) => {
                let json = serde_json::to_vec(&value).map_err(TransportError::from)?;
                RequestBody::Json(Bytes::from(json))
            }
        };

        let mut headers = HeaderMap::new();
        if !content_type.is_empty() {
            headers.insert(CONTENT_TYPE, header_value("Content-Type", content_type)?);
        }
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if !self.config.api_key.is_empty() {
            let mut auth = header_value(
                "Authorization",
                &format!("Bearer {}", self.config.api_key),
            )?;
            auth.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth);
        }

        Ok(HttpRequest {
            method: Method::POST,
            url: self.resolve_url(task),
            headers,
            body,
        })
    }

    /// Send one POST request for `task` and return the raw body of a 200 response.
    ///
    /// Any other status, including other 2xx codes, becomes [`Error::Remote`]
    /// with the decoded `error` field or the raw body as message. Transport
    /// failures and cancellation through `cancel` become [`Error::Transport`].
    /// Nothing is retried.
    pub async fn dispatch(
        &self,
        task: &str,
        content_type: &str,
        payload: impl Into<Payload>,
        cancel: &CancellationToken,
    ) -> Result<Bytes> {
        if cancel.is_cancelled() {
            debug!(task, "dispatch cancelled before sending");
            return Err(TransportError::Cancelled.into());
        }

        let payload = payload.into();
        let payload_kind = payload.kind();
        let request = self.build_request(task, content_type, payload)?;
        debug!(task, url = %request.url, payload = payload_kind, "dispatching request");

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(task, "dispatch cancelled in flight");
                return Err(TransportError::Cancelled.into());
            }
            result = self.config.transport.execute(request) => result?,
        };

        if response.status != StatusCode::OK {
            let err = Error::from_error_body(response.status.as_u16(), &response.body);
            warn!(task, status = response.status.as_u16(), "request failed: {}", err);
            return Err(err);
        }

        debug!(task, bytes = response.body.len(), "request succeeded");
        Ok(response.body)
    }

    /// [`dispatch`](Self::dispatch) followed by decoding the success body as `T`.
    pub async fn dispatch_json<T: DeserializeOwned>(
        &self,
        task: &str,
        content_type: &str,
        payload: impl Into<Payload>,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let body = self.dispatch(task, content_type, payload, cancel).await?;
        serde_json::from_slice(&body).map_err(Error::Decode)
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| TransportError::InvalidHeader(format!("{}: {}", name, e)).into())
}
