//! Error types for the polling engine

use serde_json::Value;
use thiserror::Error;

/// Result type alias for polling operations
pub type Result<T> = std::result::Result<T, PollingError>;

/// Errors that can terminate a polling session
///
/// The first four variants are the protocol outcomes: each carries the
/// endpoint it happened against and maps to a fixed status code. The last
/// two are passthrough failures that the engine does not classify.
#[derive(Debug, Error)]
pub enum PollingError {
    /// The cancellation signal was observed before an attempt
    #[error("polling aborted")]
    Aborted {
        /// Target endpoint identifier
        endpoint: String,
    },

    /// The server reported the job as unknown
    #[error("job {job_id} not found")]
    NotFound {
        /// The job identifier current at the time of the response
        job_id: String,
        /// Target endpoint identifier
        endpoint: String,
    },

    /// The server answered with a status the protocol does not know
    #[error("polling failed with status {status}")]
    Unexpected {
        /// Status code reported by the server
        status: u16,
        /// Target endpoint identifier
        endpoint: String,
        /// Raw response body, kept for diagnostics
        body: Value,
    },

    /// The attempt budget was exhausted before a terminal response
    #[error("polling exceeded {limit} attempts")]
    BudgetExceeded {
        /// The cap that was exceeded
        limit: u32,
        /// Target endpoint identifier
        endpoint: String,
    },

    /// The request issuer failed below the protocol level.
    ///
    /// Surfaced unclassified; deciding whether a transport failure is
    /// retryable is the integration layer's job, not this engine's.
    #[error("transport error: {0}")]
    Transport(anyhow::Error),

    /// The ready payload could not be decoded into the requested type
    #[error("failed to decode ready payload: {0}")]
    Decode(#[source] serde_json::Error),
}

impl PollingError {
    /// Status code of this error, for the protocol outcomes.
    ///
    /// `Aborted` is 499, `NotFound` 404, `BudgetExceeded` 504, and
    /// `Unexpected` reports the server's own code. Passthrough failures
    /// have no status.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Aborted { .. } => Some(499),
            Self::NotFound { .. } => Some(404),
            Self::Unexpected { status, .. } => Some(*status),
            Self::BudgetExceeded { .. } => Some(504),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Endpoint the failed session was polling, when known
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Aborted { endpoint }
            | Self::NotFound { endpoint, .. }
            | Self::Unexpected { endpoint, .. }
            | Self::BudgetExceeded { endpoint, .. } => Some(endpoint),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Raw response body attached to an unexpected-status failure
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Unexpected { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Check if this error reports an unknown job
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error came from the cancellation signal
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }

    /// Check if this error reports an exhausted attempt budget
    pub fn is_budget_exceeded(&self) -> bool {
        matches!(self, Self::BudgetExceeded { .. })
    }
}
