//! Operational HTTP endpoints.
//!
//! - `/metrics` : Prometheus text format, recomputed on every scrape

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use webmon_core::metrics::TEXT_CONTENT_TYPE;

use crate::app_state::AppState;

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)],
        body,
    )
        .into_response()
}
