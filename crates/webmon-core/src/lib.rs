//! webmon core: error types and the metric registry.
//!
//! This crate owns metric state and its text encoding. It carries no HTTP or
//! async runtime dependencies so the registry can be exercised directly in
//! tests and reused outside the server.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Misuse of the
//! registry (duplicate names, wrong label arity) surfaces as `WebmonError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;

/// Shared result type.
pub use error::{Result, WebmonError};
