//! HTTP mapping for `WebmonError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use webmon_core::error::{ErrorCode, WebmonError};

/// Error returned by handlers; renders as a JSON body.
#[derive(Debug)]
pub struct ApiError(pub WebmonError);

impl From<WebmonError> for ApiError {
    fn from(e: WebmonError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::BadRequest | ErrorCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
            ErrorCode::Sampling | ErrorCode::MetricConfig | ErrorCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let status = self.status();
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
