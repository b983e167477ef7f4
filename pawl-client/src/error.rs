//! Error types for the Pawl client

use pawl_core::PollingError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Pawl client
#[derive(Debug, Error)]
pub enum ClientError {
    /// The polling engine terminated the session with a protocol failure
    #[error(transparent)]
    Polling(#[from] PollingError),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Status code associated with this error, when one exists
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Polling(err) => err.status(),
            Self::RequestFailed(err) => err.status().map(|s| s.as_u16()),
            Self::InvalidRequest(_) => None,
        }
    }

    /// Check if this error reports an unknown job
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Polling(err) if err.is_not_found())
    }

    /// Check if this error came from a cancelled polling session
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Polling(err) if err.is_aborted())
    }

    /// Check if this error reports an exhausted attempt budget
    pub fn is_budget_exceeded(&self) -> bool {
        matches!(self, Self::Polling(err) if err.is_budget_exceeded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polling_errors_pass_through_transparently() {
        let err = ClientError::from(PollingError::NotFound {
            job_id: "job-1".to_string(),
            endpoint: "/api/report".to_string(),
        });

        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "job job-1 not found");
    }

    #[test]
    fn test_invalid_request_has_no_status() {
        let err = ClientError::InvalidRequest("no job id".to_string());
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_budget_exceeded_maps_to_504() {
        let err = ClientError::from(PollingError::BudgetExceeded {
            limit: 3,
            endpoint: "/api/report".to_string(),
        });

        assert!(err.is_budget_exceeded());
        assert_eq!(err.status(), Some(504));
    }
}
