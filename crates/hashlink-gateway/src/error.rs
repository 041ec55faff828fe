use std::any::Any;

use axum::extract::rejection::{BytesRejection, FormRejection, PathRejection};
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use hashlink_core::MapperError;
use thiserror::Error;
use tracing::error;

use crate::model::{ErrorResponse, ValidationResponse};
use crate::state::RuntimeMode;
use crate::validation::ValidationError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Mapper(#[from] MapperError),
    #[error(transparent)]
    Body(#[from] BytesRejection),
    #[error(transparent)]
    Form(#[from] FormRejection),
    #[error(transparent)]
    Path(#[from] PathRejection),
}

/// Marks a response as an unhandled failure.
///
/// [`error_boundary`] turns any response carrying this extension into the
/// uniform 500 envelope.
#[derive(Debug, Clone)]
pub struct InternalFailure(pub String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(err) => {
                (StatusCode::BAD_REQUEST, Json(ValidationResponse::from(&err))).into_response()
            }
            AppError::Mapper(err) => internal_failure(err.to_string()),
            AppError::Body(rejection) => rejection.into_response(),
            AppError::Form(rejection) => rejection.into_response(),
            AppError::Path(rejection) => internal_failure(rejection.body_text()),
        }
    }
}

/// Builds a bare 500 tagged with `message` for the error boundary to render.
pub fn internal_failure(message: impl Into<String>) -> Response {
    let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
    response
        .extensions_mut()
        .insert(InternalFailure(message.into()));
    response
}

/// Converts a handler panic into an internal failure.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    internal_failure(message)
}

/// The single place where unhandled failures are logged and rendered.
///
/// The underlying message is only included when running in
/// [`RuntimeMode::Development`].
pub async fn error_boundary(
    State(mode): State<RuntimeMode>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    let Some(InternalFailure(message)) = response.extensions().get::<InternalFailure>() else {
        return response;
    };

    error!(%method, %path, error = %message, "request failed");

    let exposed = mode.exposes_errors().then(|| message.clone());
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal(exposed)),
    )
        .into_response()
}
