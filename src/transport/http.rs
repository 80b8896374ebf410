use super::{HttpRequest, HttpResponse, RequestBody, Transport, TransportError};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;

/// Default [`Transport`] backed by a shared `reqwest::Client`.
///
/// `reqwest::Client` pools connections internally and is safe to share across
/// tasks, so one transport can serve any number of concurrent dispatches.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::builder().build()
    }

    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::new()
    }

    /// Wrap an already configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let builder = self.client.request(method, url);
        let builder = match body {
            RequestBody::Json(bytes) => builder.body(bytes),
            RequestBody::Multipart(file) => {
                let part = Part::bytes(file.data.to_vec())
                    .file_name(file.file_name)
                    .mime_str(&file.mime)?;
                builder.multipart(Form::new().part(file.field_name, part))
            }
        };

        let mut req = builder.build()?;
        // Applied after the body so an explicit Content-Type replaces the
        // generated multipart one instead of being appended next to it.
        for (name, value) in headers.iter() {
            req.headers_mut().insert(name.clone(), value.clone());
        }

        let response = self.client.execute(req).await?;
        let status = response.status();
        let headers = response.headers().clone();
        // Consumes the response, which hands the connection back to the pool.
        let body = response.bytes().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

pub struct ReqwestTransportBuilder {
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ReqwestTransportBuilder {
    pub fn new() -> Self {
        Self {
            timeout: None,
            user_agent: None,
        }
    }

    /// Whole-request timeout enforced by reqwest. Unset by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<ReqwestTransport, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent(
            self.user_agent
                .unwrap_or_else(|| format!("shuttle-ai-rust/{}", env!("CARGO_PKG_VERSION"))),
        );
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(ReqwestTransport { client })
    }
}

impl Default for ReqwestTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
