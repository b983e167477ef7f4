//! reqwest-backed request issuer

use std::collections::HashMap;

use async_trait::async_trait;
use pawl_core::{PollResponse, RequestIssuer};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// [`RequestIssuer`] implementation over a shared reqwest [`Client`].
///
/// Issues plain GET requests against `{base_url}{endpoint}` and reduces each
/// response to the status code plus a JSON body. Metadata entries become
/// request headers. Bodies that are not valid JSON degrade to `Value::Null`
/// instead of failing; body shape is the engine's concern, not the
/// transport's.
#[derive(Debug, Clone)]
pub struct HttpIssuer {
    /// Base URL of the polled API (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl HttpIssuer {
    /// Creates an issuer for the given base URL
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Base URL this issuer resolves endpoints against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait]
impl RequestIssuer for HttpIssuer {
    async fn query(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        metadata: &HashMap<String, String>,
    ) -> anyhow::Result<PollResponse> {
        let mut request = self.client.get(self.url(endpoint)).query(params);
        for (name, value) in metadata {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        debug!(endpoint, status, "poll query answered");
        Ok(PollResponse::new(status, body))
    }
}
