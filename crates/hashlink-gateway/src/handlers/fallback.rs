use axum::extract::OriginalUri;
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use crate::model::NotFoundResponse;

pub async fn not_found_handler(OriginalUri(uri): OriginalUri) -> (StatusCode, Json<NotFoundResponse>) {
    let path = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_owned(), |pq| pq.as_str().to_owned());

    debug!(path = %path, "no route matched");
    (StatusCode::NOT_FOUND, Json(NotFoundResponse::for_path(path)))
}
