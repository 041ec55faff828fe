//! Request body validation for the create operation.
//!
//! The accepted shape is an object with exactly one key, `url`, holding a
//! non-empty string. Validation stops at the first problem found.

use serde_json::{Map, Value};
use thiserror::Error;

const URL_FIELD: &str = "url";

/// A validated create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMappingRequest {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("\"value\" must be of type object")]
    NotAnObject,
    #[error("\"url\" is required")]
    MissingUrl,
    #[error("\"url\" must be a string")]
    UrlNotString,
    #[error("\"url\" is not allowed to be empty")]
    EmptyUrl,
    #[error("\"{0}\" is not allowed")]
    UnknownField(String),
    #[error("request body is not valid {0}")]
    MalformedBody(&'static str),
}

impl ValidationError {
    /// Body keys the failure refers to.
    pub fn keys(&self) -> Vec<String> {
        match self {
            ValidationError::MissingUrl
            | ValidationError::UrlNotString
            | ValidationError::EmptyUrl => vec![URL_FIELD.to_string()],
            ValidationError::UnknownField(key) => vec![key.clone()],
            ValidationError::NotAnObject | ValidationError::MalformedBody(_) => Vec::new(),
        }
    }
}

/// Checks a decoded request body against the create schema.
pub fn validate(body: &Value) -> Result<CreateMappingRequest, ValidationError> {
    let Value::Object(fields) = body else {
        return Err(ValidationError::NotAnObject);
    };

    validate_fields(fields)
}

fn validate_fields(fields: &Map<String, Value>) -> Result<CreateMappingRequest, ValidationError> {
    let url = match fields.get(URL_FIELD) {
        None => return Err(ValidationError::MissingUrl),
        Some(Value::String(url)) if url.is_empty() => return Err(ValidationError::EmptyUrl),
        Some(Value::String(url)) => url.clone(),
        Some(_) => return Err(ValidationError::UrlNotString),
    };

    if let Some(unknown) = fields.keys().find(|key| key.as_str() != URL_FIELD) {
        return Err(ValidationError::UnknownField(unknown.clone()));
    }

    Ok(CreateMappingRequest { url })
}
