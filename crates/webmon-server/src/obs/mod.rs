//! Metric families exported by the server.
//!
//! The registry lives in `webmon-core`; this module fixes the family names,
//! help texts and label dimensions scrapers depend on.

pub mod metrics;
