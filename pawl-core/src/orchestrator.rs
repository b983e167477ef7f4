//! Polling orchestrator
//!
//! Drives repeated status queries against an asynchronous endpoint until the
//! job completes, the attempt budget runs out, the session is cancelled, or
//! the server answers with something the protocol cannot continue from.
//!
//! Each [`poll_until_ready`](PollingOrchestrator::poll_until_ready) call owns
//! its loop state and nothing else; concurrent sessions over the same issuer
//! are fully independent.

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{PollingError, Result};
use crate::issuer::{PollResponse, RequestIssuer};
use crate::options::{AttemptLimit, NormalizedPollingOptions};
use crate::state::PollState;

/// Execution plan for one polling session
#[derive(Debug, Clone)]
pub struct PollingOrchestratorOptions {
    /// Target endpoint identifier
    pub endpoint: String,

    /// Initial job identifier. The server may rotate it between polls.
    pub job_id: String,

    /// Long-poll hint forwarded to the server, when defined
    pub wait_ms: Option<f64>,

    /// Delay between successive status queries, in milliseconds
    pub poll_interval_ms: f64,

    /// Attempt budget for this session
    pub max_poll_attempts: AttemptLimit,

    /// Cooperative cancellation signal, checked before each attempt
    pub cancel: Option<CancellationToken>,

    /// Opaque pass-through metadata forwarded verbatim to every query
    pub metadata: HashMap<String, String>,
}

impl PollingOrchestratorOptions {
    /// Builds an execution plan from normalized tuning values
    pub fn new(
        endpoint: impl Into<String>,
        job_id: impl Into<String>,
        tuning: &NormalizedPollingOptions,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            job_id: job_id.into(),
            wait_ms: tuning.wait_ms,
            poll_interval_ms: tuning.poll_interval_ms,
            max_poll_attempts: tuning.max_poll_attempts,
            cancel: None,
            metadata: HashMap::new(),
        }
    }

    /// Attaches pass-through metadata (headers, credentials, etc.)
    pub fn with_metadata(mut self, metadata: HashMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Attaches a cooperative cancellation token
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Successful outcome of a polling session
#[derive(Debug, Clone, PartialEq)]
pub struct PollingResult<T> {
    /// Final job identifier, after any rotations
    pub job_id: String,

    /// Number of interim responses observed before the terminal one
    pub attempt: u32,

    /// Decoded payload of the ready response
    pub payload: T,
}

/// Runs poll loops against an injected [`RequestIssuer`]
///
/// The orchestrator holds no per-session state; one instance can serve any
/// number of concurrent sessions.
pub struct PollingOrchestrator<I> {
    issuer: I,
}

impl<I: RequestIssuer> PollingOrchestrator<I> {
    /// Creates an orchestrator over the given request issuer
    pub fn new(issuer: I) -> Self {
        Self { issuer }
    }

    /// Polls until the job is ready or the session fails.
    ///
    /// The loop re-enters once per attempt. At re-entry the attempt budget
    /// is checked first (it counts completed interim responses, so the
    /// request that would exceed the budget is never issued), then the
    /// cancellation signal, so a cancellation requested between attempts
    /// never costs one more round trip. A zero poll interval yields to the
    /// scheduler without blocking wall-clock time.
    pub async fn poll_until_ready<T: DeserializeOwned>(
        &self,
        options: PollingOrchestratorOptions,
    ) -> Result<PollingResult<T>> {
        let mut job_id = options.job_id.clone();
        let mut attempt: u32 = 0;

        debug!(endpoint = %options.endpoint, %job_id, "starting poll loop");

        loop {
            if let AttemptLimit::Limited(limit) = options.max_poll_attempts {
                if attempt >= limit {
                    warn!(endpoint = %options.endpoint, limit, "attempt budget exhausted");
                    return Err(PollingError::BudgetExceeded {
                        limit,
                        endpoint: options.endpoint.clone(),
                    });
                }
            }

            if let Some(cancel) = &options.cancel {
                if cancel.is_cancelled() {
                    debug!(endpoint = %options.endpoint, "cancellation observed, aborting");
                    return Err(PollingError::Aborted {
                        endpoint: options.endpoint.clone(),
                    });
                }
            }

            let response = self
                .issue(&options, &job_id)
                .await
                .map_err(PollingError::Transport)?;

            let state = PollState::Issuing { job_id, attempt };
            match state.step(&options.endpoint, response) {
                PollState::Waiting {
                    job_id: next_id,
                    attempt: next_attempt,
                } => {
                    debug!(job_id = %next_id, attempt = next_attempt, "job still pending");
                    job_id = next_id;
                    attempt = next_attempt;
                    Self::pause(options.poll_interval_ms).await;
                }
                PollState::Done {
                    job_id,
                    attempt,
                    payload,
                } => {
                    info!(endpoint = %options.endpoint, %job_id, attempt, "job ready");
                    let payload = serde_json::from_value(payload).map_err(PollingError::Decode)?;
                    return Ok(PollingResult {
                        job_id,
                        attempt,
                        payload,
                    });
                }
                PollState::Failed(err) => {
                    warn!(endpoint = %options.endpoint, error = %err, "polling failed");
                    return Err(err);
                }
                // step never transitions back into Issuing
                PollState::Issuing { .. } => unreachable!(),
            }
        }
    }

    async fn issue(
        &self,
        options: &PollingOrchestratorOptions,
        job_id: &str,
    ) -> anyhow::Result<PollResponse> {
        let mut params: Vec<(&str, String)> = vec![("job", job_id.to_string())];
        if let Some(wait_ms) = options.wait_ms {
            params.push(("waitMs", wait_ms.to_string()));
        }

        self.issuer
            .query(&options.endpoint, &params, &options.metadata)
            .await
    }

    async fn pause(interval_ms: f64) {
        match pause_duration(interval_ms) {
            Some(delay) => time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }
    }
}

/// Delay before the next attempt, or `None` for a bare yield.
///
/// Total over every interval the normalizer lets through: intervals too
/// large for a `Duration` saturate instead of panicking.
fn pause_duration(interval_ms: f64) -> Option<Duration> {
    if interval_ms > 0.0 {
        Some(Duration::try_from_secs_f64(interval_ms / 1000.0).unwrap_or(Duration::MAX))
    } else {
        None
    }
}
