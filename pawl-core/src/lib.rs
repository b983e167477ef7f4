//! Pawl Core
//!
//! Protocol engine for APIs that answer asynchronously: the server accepts a
//! request, hands back a job identifier with an "accepted, try again"
//! response, and the client re-queries until a final result (or a definitive
//! failure) is available.
//!
//! This crate contains:
//! - Option normalization: turns loose, possibly-invalid user options into a
//!   safe execution plan
//! - The polling orchestrator: the cancellable loop that drives status
//!   queries to completion
//! - The error taxonomy mapping protocol outcomes to typed failures
//!
//! The transport is an external collaborator behind the [`RequestIssuer`]
//! trait; this crate never opens a connection itself. See `pawl-client` for
//! a reqwest-backed issuer.
//!
//! # Example
//!
//! ```no_run
//! use pawl_core::{
//!     NormalizedPollingOptions, PollingOrchestrator, PollingOrchestratorOptions,
//! };
//! # use std::collections::HashMap;
//! # use async_trait::async_trait;
//! # use pawl_core::{PollResponse, RequestIssuer};
//! # struct MyIssuer;
//! # #[async_trait]
//! # impl RequestIssuer for MyIssuer {
//! #     async fn query(
//! #         &self,
//! #         endpoint: &str,
//! #         params: &[(&str, String)],
//! #         metadata: &HashMap<String, String>,
//! #     ) -> anyhow::Result<PollResponse> {
//! #         unimplemented!()
//! #     }
//! # }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let orchestrator = PollingOrchestrator::new(MyIssuer);
//!
//!     let options = PollingOrchestratorOptions::new(
//!         "/api/report",
//!         "job-1",
//!         &NormalizedPollingOptions::default(),
//!     );
//!
//!     let result = orchestrator
//!         .poll_until_ready::<serde_json::Value>(options)
//!         .await?;
//!
//!     println!("ready after {} attempts: {}", result.attempt, result.payload);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod extract;
pub mod issuer;
pub mod options;
pub mod orchestrator;
pub mod state;

// Re-export commonly used types
pub use error::{PollingError, Result};
pub use extract::extract_job_id;
pub use issuer::{PollResponse, RequestIssuer};
pub use options::{
    AttemptBudget, AttemptLimit, NormalizedPollingOptions, PollingOptions, normalize,
};
pub use orchestrator::{PollingOrchestrator, PollingOrchestratorOptions, PollingResult};
