//! webmon server library entry.
//!
//! Wires config, host sources, the background sampler and the HTTP routes into
//! a monitored web server. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod config;
pub mod error;
pub mod host;
pub mod obs;
pub mod ops;
pub mod pages;
pub mod router;
pub mod sampler;
