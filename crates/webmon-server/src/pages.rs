//! Content routes.
//!
//! Every route times itself, records latency under its path and counts the
//! request under `(path, status_code)`. `/status` also samples disk usage
//! synchronously; a failed sample is answered with a 500 and still counted.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use webmon_core::error::Result;

use crate::app_state::AppState;
use crate::error::ApiError;

pub const INDEX_PATH: &str = "/";
pub const ABOUT_PATH: &str = "/about";
pub const STATUS_PATH: &str = "/status";

pub const INDEX_BODY: &str = "Hello from a fully monitored Flask app!";
pub const ABOUT_BODY: &str = "This is the about page.";
pub const STATUS_BODY: &str = "System status checked.";

pub async fn index(State(state): State<AppState>) -> std::result::Result<&'static str, ApiError> {
    let started = Instant::now();
    finish(&state, INDEX_PATH, started, Ok(INDEX_BODY))
}

pub async fn about(State(state): State<AppState>) -> std::result::Result<&'static str, ApiError> {
    let started = Instant::now();
    finish(&state, ABOUT_PATH, started, Ok(ABOUT_BODY))
}

pub async fn status(State(state): State<AppState>) -> std::result::Result<&'static str, ApiError> {
    let started = Instant::now();
    let outcome = sample_disk(&state).map(|()| STATUS_BODY);
    finish(&state, STATUS_PATH, started, outcome)
}

fn sample_disk(state: &AppState) -> Result<()> {
    let mount = state.cfg().sampler.disk_mount();
    match state.disk_source().usage_percent(mount) {
        Ok(percent) => state.metrics().disk_usage.set(&[], percent),
        Err(e) => {
            tracing::error!(error = %e, mount = %mount.display(), "disk sample failed");
            Err(e)
        }
    }
}

/// Record the request outcome, then hand the body or error to axum.
fn finish(
    state: &AppState,
    path: &'static str,
    started: Instant,
    outcome: Result<&'static str>,
) -> std::result::Result<&'static str, ApiError> {
    let outcome = outcome.map_err(ApiError::from);
    let status = match &outcome {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status(),
    };
    state
        .metrics()
        .record_request(path, status, started.elapsed())?;
    outcome
}
