//! Poll loop state machine
//!
//! The loop's classification logic lives here as a pure transition function
//! over an explicit state enum, so the four terminal outcomes and the one
//! continuing outcome can be checked exhaustively without a transport.
//! The orchestrator drives this machine; nothing else mutates it.

use serde_json::Value;

use crate::error::PollingError;
use crate::extract::extract_job_id;
use crate::issuer::PollResponse;

/// State of a single polling session
#[derive(Debug)]
pub enum PollState {
    /// About to issue (or awaiting) a status query
    Issuing {
        /// Current tracking identifier
        job_id: String,
        /// Follow-up queries consumed so far
        attempt: u32,
    },
    /// Interim response observed; sleeping before the next query
    Waiting {
        /// Tracking identifier, possibly rotated by the interim response
        job_id: String,
        /// Follow-up queries consumed so far
        attempt: u32,
    },
    /// Terminal: the job finished and the payload is available
    Done {
        /// Final tracking identifier
        job_id: String,
        /// Interim responses observed before the terminal one
        attempt: u32,
        /// Raw response body of the ready response
        payload: Value,
    },
    /// Terminal: the session failed
    Failed(PollingError),
}

impl PollState {
    /// Classifies a response and transitions to the next state.
    ///
    /// Only `Issuing` reacts to a response:
    /// - 200 moves to `Done` with the body as payload
    /// - 202 moves to `Waiting`, rotating the job id if the body carries
    ///   one and counting one more attempt
    /// - 404 fails with [`PollingError::NotFound`] naming the current id
    /// - anything else fails with [`PollingError::Unexpected`], keeping
    ///   the body for diagnostics
    ///
    /// Terminal states and `Waiting` absorb: stepping them is a no-op.
    pub fn step(self, endpoint: &str, response: PollResponse) -> PollState {
        let PollState::Issuing { job_id, attempt } = self else {
            return self;
        };

        match response.status {
            200 => PollState::Done {
                job_id,
                attempt,
                payload: response.body,
            },
            // saturating: an unlimited session can outlive a u32
            202 => PollState::Waiting {
                job_id: extract_job_id(&response.body).unwrap_or(job_id),
                attempt: attempt.saturating_add(1),
            },
            404 => PollState::Failed(PollingError::NotFound {
                job_id,
                endpoint: endpoint.to_string(),
            }),
            status => PollState::Failed(PollingError::Unexpected {
                status,
                endpoint: endpoint.to_string(),
                body: response.body,
            }),
        }
    }
}
