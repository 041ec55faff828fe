use crate::error::Result;
use crate::extract::CreateMappingBody;
use crate::model::{CreateMappingResponse, Envelope, ResolveMappingResponse};
use crate::state::AppState;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use hashlink_core::Identifier;
use tracing::info;

pub async fn create_mapping_handler(
    State(state): State<AppState>,
    CreateMappingBody(request): CreateMappingBody,
) -> Result<(StatusCode, Json<Envelope<CreateMappingResponse>>)> {
    let identifier = state.mapper().create(request.url).await?;
    info!(identifier = %identifier, "created mapping");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new(CreateMappingResponse::success(
            identifier.into_inner(),
        ))),
    ))
}

/// Looks up a mapping. A miss is still a 200; the body says `"Failed"`.
///
/// A path segment that does not decode to UTF-8 is an internal failure, not
/// a plain-text rejection.
pub async fn resolve_mapping_handler(
    State(state): State<AppState>,
    identifier: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Envelope<ResolveMappingResponse>>> {
    let Path(identifier) = identifier?;
    let identifier = Identifier::from_path(identifier);
    let url = state.mapper().resolve(&identifier).await?;

    Ok(Json(Envelope::new(ResolveMappingResponse::from_lookup(url))))
}
