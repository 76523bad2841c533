//! Axum router wiring.
//!
//! Unknown paths fall through to axum's default 404 and are not recorded.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, pages};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(pages::INDEX_PATH, get(pages::index))
        .route(pages::ABOUT_PATH, get(pages::about))
        .route(pages::STATUS_PATH, get(pages::status))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
