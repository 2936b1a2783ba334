pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::craft::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/options", get(handlers::handle_options))
        .route(
            "/api/craft",
            post(handlers::handle_craft).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}
