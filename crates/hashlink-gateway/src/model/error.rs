use serde::Serialize;

use crate::validation::ValidationError;

pub const INTERNAL_ERROR: &str = "Internal server error";
pub const ROUTE_NOT_FOUND: &str = "Route not found";

/// Body of a 500 response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn internal(message: Option<String>) -> Self {
        Self {
            success: false,
            error: INTERNAL_ERROR,
            message,
        }
    }
}

/// Body of a 404 for unmatched routes.
#[derive(Debug, Serialize)]
pub struct NotFoundResponse {
    pub success: bool,
    pub error: &'static str,
    pub path: String,
}

impl NotFoundResponse {
    pub fn for_path(path: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ROUTE_NOT_FOUND,
            path: path.into(),
        }
    }
}

/// Body of a 400 for a request that failed validation.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub success: bool,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub error: &'static str,
    pub message: &'static str,
    pub validation: ValidationSegments,
}

#[derive(Debug, Serialize)]
pub struct ValidationSegments {
    pub body: ValidationDetails,
}

#[derive(Debug, Serialize)]
pub struct ValidationDetails {
    pub source: &'static str,
    pub keys: Vec<String>,
    pub message: String,
}

impl From<&ValidationError> for ValidationResponse {
    fn from(err: &ValidationError) -> Self {
        Self {
            success: false,
            status_code: 400,
            error: "Bad Request",
            message: "Validation failed",
            validation: ValidationSegments {
                body: ValidationDetails {
                    source: "body",
                    keys: err.keys(),
                    message: err.to_string(),
                },
            },
        }
    }
}
