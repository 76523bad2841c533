//! In-process metric registry with Prometheus text exposition.
//!
//! Counters and gauges are atomics inside a `DashMap` keyed by label values;
//! histogram series are plain structs mutated under the shard write guard.
//! Series are created lazily on first write and never removed.

mod counter;
mod desc;
pub mod encode;
mod gauge;
mod histogram;
mod registry;
mod snapshot;

pub use counter::Counter;
pub use desc::Desc;
pub use encode::{encode_text, TEXT_CONTENT_TYPE};
pub use gauge::Gauge;
pub use histogram::{Buckets, Histogram, DEFAULT_BUCKETS};
pub use registry::{MetricHandle, MetricKind, Registry};
pub use snapshot::{FamilySnapshot, HistogramSnapshot, MetricType, SeriesSnapshot, SeriesValue};
