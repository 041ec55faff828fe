use jiff::Timestamp;
use serde::Serialize;

pub const HEALTH_MESSAGE: &str = "URL Shortener API is running";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: Timestamp,
}

impl HealthResponse {
    pub fn now() -> Self {
        Self {
            success: true,
            message: HEALTH_MESSAGE,
            timestamp: Timestamp::now(),
        }
    }
}
