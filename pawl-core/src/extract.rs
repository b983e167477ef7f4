//! Job identifier extraction
//!
//! Interim responses may carry a rotated tracking identifier in their body.
//! Extraction is best effort and never fails: an unexpected body shape is
//! not an error, it simply means the server did not ask us to change
//! tracking id.

use serde_json::Value;

/// Pulls a rotated job identifier out of an interim response body.
///
/// Returns `Some` only when the body is an object whose `jobId` field holds
/// a string that is non-empty after trimming. Everything else yields `None`
/// and the caller keeps its previous identifier.
pub fn extract_job_id(body: &Value) -> Option<String> {
    let id = body.get("jobId")?.as_str()?.trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracts_job_id() {
        assert_eq!(
            extract_job_id(&json!({ "jobId": "job-2" })),
            Some("job-2".to_string())
        );
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            extract_job_id(&json!({ "jobId": "  job-2\n" })),
            Some("job-2".to_string())
        );
    }

    #[test]
    fn test_blank_id_is_no_update() {
        assert_eq!(extract_job_id(&json!({ "jobId": "   " })), None);
        assert_eq!(extract_job_id(&json!({ "jobId": "" })), None);
    }

    #[test]
    fn test_unexpected_shapes_are_no_update() {
        assert_eq!(extract_job_id(&Value::Null), None);
        assert_eq!(extract_job_id(&json!("job-2")), None);
        assert_eq!(extract_job_id(&json!(42)), None);
        assert_eq!(extract_job_id(&json!(["job-2"])), None);
        assert_eq!(extract_job_id(&json!({ "jobId": 42 })), None);
        assert_eq!(extract_job_id(&json!({ "status": "pending" })), None);
    }
}
