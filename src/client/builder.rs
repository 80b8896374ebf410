use super::dispatch::{ClientConfig, ShuttleClient, DEFAULT_BASE_URL};
use crate::transport::{ReqwestTransport, Transport};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Builder for [`ShuttleClient`].
///
/// Everything is optional: the default is an unauthenticated client against
/// [`DEFAULT_BASE_URL`] using [`ReqwestTransport`].
pub struct ShuttleClientBuilder {
    api_key: String,
    base_url: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    timeout: Option<Duration>,
}

impl ShuttleClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            transport: None,
            timeout: None,
        }
    }

    /// API key sent as a bearer token. Empty disables the `Authorization` header.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Override the base URL (mock servers, proxies, self-hosted gateways).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Inject a custom transport. Default is [`ReqwestTransport`].
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Request timeout for the default transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ShuttleClient> {
        let base_url = match self.base_url {
            Some(raw) => validate_base_url(&raw)?,
            None => DEFAULT_BASE_URL.to_string(),
        };

        let transport: Arc<dyn Transport> = match (self.transport, self.timeout) {
            (Some(_), Some(_)) => {
                return Err(Error::configuration_with_context(
                    "timeout only applies to the default transport",
                    ErrorContext::new().with_field_path("timeout"),
                ))
            }
            (Some(transport), None) => transport,
            (None, timeout) => {
                let mut builder = ReqwestTransport::builder();
                if let Some(timeout) = timeout {
                    builder = builder.timeout(timeout);
                }
                let transport = builder.build().map_err(|e| {
                    Error::configuration(format!("Failed to create HTTP client: {}", e))
                })?;
                Arc::new(transport)
            }
        };

        Ok(ShuttleClient::from_config(ClientConfig {
            api_key: self.api_key,
            base_url,
            transport,
        }))
    }
}

impl Default for ShuttleClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Check that `raw` is an absolute http(s) URL usable as a prefix and strip one trailing `/`.
fn validate_base_url(raw: &str) -> Result<String> {
    let invalid = |details: String| {
        Error::configuration_with_context(
            format!("Invalid base URL '{}'", raw),
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(details),
        )
    };

    let trimmed = raw.strip_suffix('/').unwrap_or(raw);
    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let client = ShuttleClientBuilder::new().build().unwrap();
        assert_eq!(client.config().base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.config().api_key(), "");
    }

    #[test]
    fn test_new_uses_default_base_url() {
        let client = ShuttleClient::new("sk-123").unwrap();
        assert_eq!(client.config().api_key(), "sk-123");
        assert_eq!(
            client.resolve_url("chat/completions"),
            "https://api.shuttleai.app/chat/completions"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ShuttleClient::builder()
            .base_url("http://localhost:8080/v1/")
            .build()
            .unwrap();
        assert_eq!(client.resolve_url("models"), "http://localhost:8080/v1/models");
    }

    #[test]
    fn test_rejects_malformed_base_urls() {
        for bad in [
            "",
            "api.shuttleai.app",
            "ftp://files.example.com",
            "https://x.io/?a=1",
            "https://x.io#frag",
        ] {
            let err = ShuttleClient::builder().base_url(bad).build().unwrap_err();
            let context = err.context().expect("configuration error carries context");
            assert_eq!(context.field_path.as_deref(), Some("base_url"), "input: {bad:?}");
        }
    }

    #[test]
    fn test_timeout_with_custom_transport_is_rejected() {
        let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new().unwrap());
        let err = ShuttleClient::builder()
            .transport(transport)
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_timeout_builds_default_transport() {
        let client = ShuttleClient::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();
        assert_eq!(client.config().base_url(), DEFAULT_BASE_URL);
    }
}
