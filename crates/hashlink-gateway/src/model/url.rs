use serde::{Deserialize, Serialize};

pub const SUCCESS: &str = "Success";
pub const FAILED: &str = "Failed";

/// Wraps every mapping payload under a `response` key.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub response: T,
}

impl<T> Envelope<T> {
    pub fn new(response: T) -> Self {
        Self { response }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMappingResponse {
    pub message: String,
    #[serde(rename = "shortURL")]
    pub short_url: String,
}

impl CreateMappingResponse {
    pub fn success(short_url: impl Into<String>) -> Self {
        Self {
            message: SUCCESS.to_string(),
            short_url: short_url.into(),
        }
    }
}

/// Outcome of a lookup. A miss carries `"Failed"` and no `url`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResolveMappingResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ResolveMappingResponse {
    pub fn from_lookup(url: Option<String>) -> Self {
        match url {
            Some(url) => Self {
                message: SUCCESS.to_string(),
                url: Some(url),
            },
            None => Self {
                message: FAILED.to_string(),
                url: None,
            },
        }
    }
}
