pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::guide::handlers as guide_handlers;
use crate::retrieval::handlers as retrieval_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/guides",
            post(guide_handlers::handle_create_guide),
        )
        .route(
            "/api/v1/guides/preview",
            post(guide_handlers::handle_preview_guide),
        )
        .route(
            "/api/v1/guides/:id",
            get(retrieval_handlers::handle_get_guide),
        )
        .route(
            "/api/v1/guides/:id/resolve",
            post(retrieval_handlers::handle_resolve_guide),
        )
        .with_state(state)
}
