//! Request issuer seam
//!
//! The engine never talks to a transport directly. Every status query goes
//! through a [`RequestIssuer`], injected by the caller, which reduces the
//! wire exchange to an integer status plus a JSON body. This is what keeps
//! the poll loop testable without any HTTP stack.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

/// Outcome of a single status query, as seen by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct PollResponse {
    /// HTTP-like status code
    pub status: u16,
    /// Response body. Issuers should degrade unparseable bodies to
    /// `Value::Null` rather than failing; body shape is never an error at
    /// this level.
    pub body: Value,
}

impl PollResponse {
    /// Convenience constructor
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }
}

/// Abstraction over the transport issuing status queries.
///
/// Implementations must be safe for concurrent use: several polling
/// sessions may share one issuer. Errors returned here are transport-level
/// failures and propagate out of the engine unclassified.
#[async_trait]
pub trait RequestIssuer: Send + Sync {
    /// Issue one query against `endpoint` with the given query parameters.
    ///
    /// `metadata` is opaque pass-through (headers, credentials, and the
    /// like); the engine forwards it verbatim on every attempt and never
    /// inspects it.
    async fn query(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        metadata: &HashMap<String, String>,
    ) -> anyhow::Result<PollResponse>;
}

#[async_trait]
impl<I: RequestIssuer + ?Sized> RequestIssuer for std::sync::Arc<I> {
    async fn query(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
        metadata: &HashMap<String, String>,
    ) -> anyhow::Result<PollResponse> {
        (**self).query(endpoint, params, metadata).await
    }
}
