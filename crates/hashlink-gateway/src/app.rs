use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::error::{error_boundary, panic_response};
use crate::handlers::{
    create_mapping_handler, health_handler, not_found_handler, resolve_mapping_handler,
};
use crate::state::AppState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub struct App {}

impl App {
    /// Builds the router.
    ///
    /// A known path requested with the wrong method falls through to the
    /// same 404 as an unknown path. A single trailing slash is accepted on
    /// the GET routes.
    pub fn router(state: AppState) -> Router {
        let mode = state.mode();

        Router::new()
            .route(
                "/health",
                get(health_handler).fallback(not_found_handler),
            )
            .route(
                "/",
                post(create_mapping_handler).fallback(not_found_handler),
            )
            .route(
                "/health/",
                get(health_handler).fallback(not_found_handler),
            )
            .route(
                "/{identifier}",
                get(resolve_mapping_handler).fallback(not_found_handler),
            )
            .route(
                "/{identifier}/",
                get(resolve_mapping_handler).fallback(not_found_handler),
            )
            .fallback(not_found_handler)
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(from_fn_with_state(mode, error_boundary))
            .layer(CorsLayer::permissive())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .with_state(state)
    }
}
