use serde::Serialize;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_FAILURE: &str = "failure";
pub const STATUS_FAILED: &str = "failed";

/// One outbound call as recorded in the request audit trail. The same shape is written to the
/// attempt-level log and, on exhaustion, to the failed-request log.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewRequestLog {
    pub context: String,
    pub url: String,
    pub status: String,
    pub attempt_count: i32,
    pub error_message: Option<String>,
    pub response_code: Option<i32>,
    pub response_body: Option<String>,
}
