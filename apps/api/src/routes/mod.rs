pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::render::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document generation API
        .route(
            "/api/v1/documents",
            post(handlers::handle_generate_documents),
        )
        .route(
            "/api/v1/documents/preview",
            post(handlers::handle_preview_document),
        )
        .with_state(state)
}
