use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use super::desc::Desc;
use super::snapshot::{sorted, HistogramSnapshot, SeriesSnapshot, SeriesValue};
use crate::error::{Result, WebmonError};

/// Standard latency buckets in seconds (the `+Inf` bound is implicit).
pub const DEFAULT_BUCKETS: [f64; 14] = [
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Ascending bucket upper bounds, always terminated by `+Inf`.
#[derive(Debug, Clone, PartialEq)]
pub struct Buckets(Vec<f64>);

impl Buckets {
    /// Validate explicit bounds. A trailing `+Inf` is appended when missing.
    pub fn new(bounds: impl Into<Vec<f64>>) -> Result<Self> {
        let mut bounds = bounds.into();
        if bounds.is_empty() {
            return Err(WebmonError::InvalidBuckets("no bounds given".into()));
        }
        if bounds.iter().any(|b| b.is_nan()) {
            return Err(WebmonError::InvalidBuckets("NaN bound".into()));
        }
        if bounds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(WebmonError::InvalidBuckets(
                "bounds must be strictly ascending".into(),
            ));
        }
        if bounds.last() != Some(&f64::INFINITY) {
            bounds.push(f64::INFINITY);
        }
        Ok(Self(bounds))
    }

    pub fn bounds(&self) -> &[f64] {
        &self.0
    }
}

impl Default for Buckets {
    fn default() -> Self {
        let mut bounds = DEFAULT_BUCKETS.to_vec();
        bounds.push(f64::INFINITY);
        Self(bounds)
    }
}

/// Per-series state. Mutated only under the owning shard's write guard so a
/// reader never sees buckets out of step with `count`/`sum`.
#[derive(Debug, Clone)]
struct HistogramSeries {
    cumulative: Vec<u64>,
    sum: f64,
    count: u64,
}

#[derive(Clone)]
pub struct Histogram {
    inner: Arc<HistogramInner>,
}

struct HistogramInner {
    desc: Desc,
    buckets: Buckets,
    series: DashMap<Vec<String>, HistogramSeries>,
}

impl Histogram {
    pub(crate) fn new(desc: Desc, buckets: Buckets) -> Result<Self> {
        if desc.label_names.iter().any(|l| l == "le") {
            return Err(WebmonError::InvalidName(format!(
                "label \"le\" is reserved on histogram {}",
                desc.name
            )));
        }
        Ok(Self {
            inner: Arc::new(HistogramInner {
                desc,
                buckets,
                series: DashMap::new(),
            }),
        })
    }

    pub fn desc(&self) -> &Desc {
        &self.inner.desc
    }

    pub fn buckets(&self) -> &Buckets {
        &self.inner.buckets
    }

    /// Record one observation into every bucket whose bound is >= `v`.
    pub fn observe(&self, labels: &[&str], v: f64) -> Result<()> {
        if v.is_nan() {
            return Err(WebmonError::InvalidValue {
                metric: self.inner.desc.name.clone(),
                value: v,
            });
        }
        let key = self.inner.desc.series_key(labels)?;
        let bounds = self.inner.buckets.bounds();
        let mut series = self.inner.series.entry(key).or_insert_with(|| HistogramSeries {
            cumulative: vec![0; bounds.len()],
            sum: 0.0,
            count: 0,
        });

        series.count += 1;
        series.sum += v;
        for (slot, &le) in series.cumulative.iter_mut().zip(bounds) {
            if v <= le {
                *slot += 1;
            }
        }
        Ok(())
    }

    /// Record an elapsed duration in seconds.
    pub fn observe_duration(&self, labels: &[&str], d: Duration) -> Result<()> {
        self.observe(labels, d.as_secs_f64())
    }

    /// Copy of one series, `None` if nothing was observed for it yet.
    pub fn get(&self, labels: &[&str]) -> Result<Option<HistogramSnapshot>> {
        let key = self.inner.desc.series_key(labels)?;
        Ok(self.inner.series.get(&key).map(|s| self.freeze(&s)))
    }

    fn freeze(&self, s: &HistogramSeries) -> HistogramSnapshot {
        HistogramSnapshot {
            buckets: self
                .inner
                .buckets
                .bounds()
                .iter()
                .copied()
                .zip(s.cumulative.iter().copied())
                .collect(),
            sum: s.sum,
            count: s.count,
        }
    }

    pub(crate) fn collect(&self) -> Vec<SeriesSnapshot> {
        sorted(
            self.inner
                .series
                .iter()
                .map(|r| SeriesSnapshot {
                    label_values: r.key().clone(),
                    value: SeriesValue::Histogram(self.freeze(r.value())),
                })
                .collect(),
        )
    }
}
