//! Shared error type across webmon crates.

use thiserror::Error;

/// Stable error codes surfaced to HTTP callers and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid configuration file content.
    BadRequest,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// Metric registration or observation misuse.
    MetricConfig,
    /// Host measurement could not be read.
    Sampling,
    /// Internal server error.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::MetricConfig => "METRIC_CONFIG",
            ErrorCode::Sampling => "SAMPLING_FAILED",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, WebmonError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum WebmonError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("metric already registered: {0}")]
    DuplicateMetric(String),
    #[error("invalid name: {0}")]
    InvalidName(String),
    #[error("invalid histogram buckets: {0}")]
    InvalidBuckets(String),
    #[error("metric {metric} is a {actual}, not a {requested}")]
    WrongKind {
        metric: String,
        actual: &'static str,
        requested: &'static str,
    },
    #[error("metric {metric} expects {expected} label values, got {got}")]
    LabelArity {
        metric: String,
        expected: usize,
        got: usize,
    },
    #[error("invalid value for {metric}: {value}")]
    InvalidValue { metric: String, value: f64 },
    #[error("sampling failed: {0}")]
    Sampling(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl WebmonError {
    /// Map internal error to a stable client-facing code.
    pub fn code(&self) -> ErrorCode {
        match self {
            WebmonError::BadRequest(_) => ErrorCode::BadRequest,
            WebmonError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            WebmonError::DuplicateMetric(_)
            | WebmonError::InvalidName(_)
            | WebmonError::InvalidBuckets(_)
            | WebmonError::WrongKind { .. }
            | WebmonError::LabelArity { .. }
            | WebmonError::InvalidValue { .. } => ErrorCode::MetricConfig,
            WebmonError::Sampling(_) => ErrorCode::Sampling,
            WebmonError::Internal(_) => ErrorCode::Internal,
        }
    }
}
