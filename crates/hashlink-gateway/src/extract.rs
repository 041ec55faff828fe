use axum::body::Bytes;
use axum::extract::rejection::FormRejection;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::validation::{validate, CreateMappingRequest, ValidationError};

/// Extracts and validates the body of a create request.
///
/// JSON and urlencoded form bodies are both accepted. A request with any
/// other content type is treated as carrying an empty object, so it fails
/// validation on the missing `url`.
#[derive(Debug)]
pub struct CreateMappingBody(pub CreateMappingRequest);

enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(request: &Request) -> BodyKind {
    let Some(content_type) = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return BodyKind::Other;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

fn parse_json(bytes: &[u8]) -> Result<Value, ValidationError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|_| ValidationError::MalformedBody("JSON"))
}

/// Folds decoded form pairs into an object. A key given more than once
/// becomes an array of its values, so `url=a&url=b` is not a string.
fn form_to_value(pairs: Vec<(String, String)>) -> Value {
    let mut fields = Map::new();
    for (key, value) in pairs {
        match fields.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(Value::String(value));
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(values) => values.push(Value::String(value)),
                existing => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, Value::String(value)]);
                }
            },
        }
    }
    Value::Object(fields)
}

impl<S> FromRequest<S> for CreateMappingBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = match body_kind(&request) {
            BodyKind::Json => {
                let bytes = Bytes::from_request(request, state).await?;
                parse_json(&bytes)?
            }
            BodyKind::Form => {
                let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, state)
                    .await
                    .map_err(|rejection| match rejection {
                        FormRejection::FailedToDeserializeFormBody(_) => {
                            AppError::Validation(ValidationError::MalformedBody("form data"))
                        }
                        other => AppError::Form(other),
                    })?;
                form_to_value(pairs)
            }
            BodyKind::Other => Value::Object(Map::new()),
        };

        Ok(Self(validate(&body)?))
    }
}
