use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

use super::desc::Desc;
use super::snapshot::{sorted, SeriesSnapshot, SeriesValue};
use crate::error::Result;

/// Monotonic counter family. Cloning shares the underlying series.
#[derive(Clone)]
pub struct Counter {
    inner: Arc<CounterInner>,
}

struct CounterInner {
    desc: Desc,
    series: DashMap<Vec<String>, AtomicU64>,
}

impl Counter {
    pub(crate) fn new(desc: Desc) -> Self {
        Self {
            inner: Arc::new(CounterInner {
                desc,
                series: DashMap::new(),
            }),
        }
    }

    pub fn desc(&self) -> &Desc {
        &self.inner.desc
    }

    /// Increment by 1.
    pub fn inc(&self, labels: &[&str]) -> Result<()> {
        self.inc_by(labels, 1)
    }

    /// Increment by an arbitrary value. The series is created on first use.
    pub fn inc_by(&self, labels: &[&str], v: u64) -> Result<()> {
        let key = self.inner.desc.series_key(labels)?;
        let counter = self
            .inner
            .series
            .entry(key)
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
        Ok(())
    }

    /// Current value, `None` if the series was never incremented.
    pub fn get(&self, labels: &[&str]) -> Result<Option<u64>> {
        let key = self.inner.desc.series_key(labels)?;
        Ok(self
            .inner
            .series
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed)))
    }

    pub(crate) fn collect(&self) -> Vec<SeriesSnapshot> {
        sorted(
            self.inner
                .series
                .iter()
                .map(|r| SeriesSnapshot {
                    label_values: r.key().clone(),
                    value: SeriesValue::Counter(r.value().load(Ordering::Relaxed)),
                })
                .collect(),
        )
    }
}
