//! Pawl HTTP Client
//!
//! A reqwest-backed integration layer over the `pawl-core` polling engine.
//!
//! This crate wires the engine's [`RequestIssuer`](pawl_core::RequestIssuer)
//! seam to a real HTTP client and adds the kickoff flow: issue the initial
//! request, and when the server answers "accepted, try again" with a job
//! identifier, keep polling until the result is ready.
//!
//! # Example
//!
//! ```no_run
//! use pawl_client::PollClient;
//! use pawl_core::PollingOptions;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PollClient::new("http://localhost:8080");
//!
//!     // Kick off the request; polls transparently if the server defers.
//!     let report: serde_json::Value = client
//!         .get_or_poll("/api/report", &PollingOptions::default())
//!         .await?;
//!
//!     println!("report: {report}");
//!     Ok(())
//! }
//! ```

pub mod error;
mod issuer;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use issuer::HttpIssuer;
pub use pawl_core::{AttemptBudget, PollingError, PollingOptions, PollingResult};

use std::collections::HashMap;

use pawl_core::{
    PollingOrchestrator, PollingOrchestratorOptions, RequestIssuer, extract_job_id, normalize,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for APIs that may answer asynchronously
///
/// Wraps an [`HttpIssuer`] and the polling engine behind a small surface:
/// - [`get_or_poll`](Self::get_or_poll) for the full kickoff-then-poll flow
/// - [`poll_job`](Self::poll_job) to resume polling a known job
/// - [`poll_with`](Self::poll_with) for full control over the execution plan
///   (cancellation, metadata)
#[derive(Debug, Clone)]
pub struct PollClient {
    issuer: HttpIssuer,
}

impl PollClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the polled API (e.g., "http://localhost:8080")
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use pawl_client::PollClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = PollClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            issuer: HttpIssuer::new(base_url, client),
        }
    }

    /// Get the base URL of the polled API
    pub fn base_url(&self) -> &str {
        self.issuer.base_url()
    }

    /// Issue a request and poll to completion if the server defers it.
    ///
    /// A 200 answer returns the payload directly. A 202 answer carrying a
    /// job identifier hands off to the polling engine; a 202 without one is
    /// an [`ClientError::InvalidRequest`]. Any other status maps through the
    /// engine's error taxonomy.
    pub async fn get_or_poll<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &PollingOptions,
    ) -> Result<T> {
        self.get_or_poll_with_metadata(path, options, HashMap::new())
            .await
    }

    /// Like [`get_or_poll`](Self::get_or_poll), forwarding metadata
    /// (headers, credentials) verbatim on the kickoff and on every poll.
    pub async fn get_or_poll_with_metadata<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &PollingOptions,
        metadata: HashMap<String, String>,
    ) -> Result<T> {
        let tuning = normalize(options);

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(wait_ms) = tuning.wait_ms {
            params.push(("waitMs", wait_ms.to_string()));
        }

        let response = self
            .issuer
            .query(path, &params, &metadata)
            .await
            .map_err(PollingError::Transport)?;

        match response.status {
            200 => Ok(serde_json::from_value(response.body).map_err(PollingError::Decode)?),
            202 => {
                let Some(job_id) = extract_job_id(&response.body) else {
                    return Err(ClientError::InvalidRequest(format!(
                        "accepted response from {path} carried no job id"
                    )));
                };

                debug!(%job_id, path, "request deferred, polling");
                let plan = PollingOrchestratorOptions::new(path, job_id, &tuning)
                    .with_metadata(metadata);
                let result = self.poll_with::<T>(plan).await?;
                Ok(result.payload)
            }
            status => Err(ClientError::from(PollingError::Unexpected {
                status,
                endpoint: path.to_string(),
                body: response.body,
            })),
        }
    }

    /// Poll a known job to completion
    ///
    /// # Arguments
    /// * `path` - Endpoint path the job was kicked off against
    /// * `job_id` - Tracking identifier from the accepted response
    /// * `options` - Loose polling options; normalized before use
    pub async fn poll_job<T: DeserializeOwned>(
        &self,
        path: &str,
        job_id: &str,
        options: &PollingOptions,
    ) -> Result<PollingResult<T>> {
        let plan = PollingOrchestratorOptions::new(path, job_id, &normalize(options));
        self.poll_with(plan).await
    }

    /// Poll with a fully specified execution plan
    ///
    /// Use this when the session needs pass-through metadata or a
    /// cancellation token.
    pub async fn poll_with<T: DeserializeOwned>(
        &self,
        plan: PollingOrchestratorOptions,
    ) -> Result<PollingResult<T>> {
        let orchestrator = PollingOrchestrator::new(self.issuer.clone());
        Ok(orchestrator.poll_until_ready(plan).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = PollClient::new("http://localhost:8080");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = PollClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = PollClient::with_client("http://localhost:8080", http_client);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
