use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ProcessDataResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
}

impl ProcessDataResponse {
    pub fn new(message: &str) -> Self {
        ProcessDataResponse {
            status_code: 200,
            message: message.to_string(),
        }
    }
}
