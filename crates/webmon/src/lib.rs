//! Top-level facade crate for webmon.
//!
//! Re-exports the metric registry and the server library so users can depend
//! on a single crate.

pub mod core {
    pub use webmon_core::*;
}

pub mod server {
    pub use webmon_server::*;
}
