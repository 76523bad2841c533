//! Metric registry.
//!
//! Families are registered once through `&mut Registry` while the process is
//! being wired, then the registry is shared read-only (`Arc<Registry>`).
//! Callers record through the typed handles returned at registration; the
//! registry itself is only walked by `snapshot`.

use super::counter::Counter;
use super::desc::Desc;
use super::encode;
use super::gauge::Gauge;
use super::histogram::{Buckets, Histogram};
use super::snapshot::{FamilySnapshot, MetricType};
use crate::error::{Result, WebmonError};

/// What to register under a name.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram(Buckets),
}

impl MetricKind {
    pub fn metric_type(&self) -> MetricType {
        match self {
            MetricKind::Counter => MetricType::Counter,
            MetricKind::Gauge => MetricType::Gauge,
            MetricKind::Histogram(_) => MetricType::Histogram,
        }
    }
}

/// Handle to a registered family of any kind.
#[derive(Clone)]
pub enum MetricHandle {
    Counter(Counter),
    Gauge(Gauge),
    Histogram(Histogram),
}

impl MetricHandle {
    pub fn desc(&self) -> &Desc {
        match self {
            MetricHandle::Counter(c) => c.desc(),
            MetricHandle::Gauge(g) => g.desc(),
            MetricHandle::Histogram(h) => h.desc(),
        }
    }

    pub fn metric_type(&self) -> MetricType {
        match self {
            MetricHandle::Counter(_) => MetricType::Counter,
            MetricHandle::Gauge(_) => MetricType::Gauge,
            MetricHandle::Histogram(_) => MetricType::Histogram,
        }
    }

    pub fn observe_counter(&self, labels: &[&str]) -> Result<()> {
        self.as_counter()?.inc(labels)
    }

    pub fn observe_histogram(&self, labels: &[&str], v: f64) -> Result<()> {
        self.as_histogram()?.observe(labels, v)
    }

    pub fn set_gauge(&self, labels: &[&str], v: f64) -> Result<()> {
        self.as_gauge()?.set(labels, v)
    }

    pub fn as_counter(&self) -> Result<&Counter> {
        match self {
            MetricHandle::Counter(c) => Ok(c),
            _ => Err(self.wrong_kind(MetricType::Counter)),
        }
    }

    pub fn as_gauge(&self) -> Result<&Gauge> {
        match self {
            MetricHandle::Gauge(g) => Ok(g),
            _ => Err(self.wrong_kind(MetricType::Gauge)),
        }
    }

    pub fn as_histogram(&self) -> Result<&Histogram> {
        match self {
            MetricHandle::Histogram(h) => Ok(h),
            _ => Err(self.wrong_kind(MetricType::Histogram)),
        }
    }

    fn wrong_kind(&self, requested: MetricType) -> WebmonError {
        WebmonError::WrongKind {
            metric: self.desc().name.clone(),
            actual: self.metric_type().as_str(),
            requested: requested.as_str(),
        }
    }

    fn collect(&self) -> FamilySnapshot {
        let desc = self.desc();
        let series = match self {
            MetricHandle::Counter(c) => c.collect(),
            MetricHandle::Gauge(g) => g.collect(),
            MetricHandle::Histogram(h) => h.collect(),
        };
        FamilySnapshot {
            name: desc.name.clone(),
            help: desc.help.clone(),
            kind: self.metric_type(),
            label_names: desc.label_names.clone(),
            series,
        }
    }
}

/// Ordered collection of metric families with unique names.
#[derive(Default)]
pub struct Registry {
    families: Vec<MetricHandle>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new family. Names are unique for the registry's lifetime.
    pub fn register(
        &mut self,
        name: &str,
        kind: MetricKind,
        help: &str,
        label_names: &[&str],
    ) -> Result<MetricHandle> {
        if let Some(existing) = self.families.iter().find(|f| f.desc().name == name) {
            let existing = existing.metric_type();
            let requested = kind.metric_type();
            return Err(if existing == requested {
                WebmonError::DuplicateMetric(name.to_string())
            } else {
                WebmonError::DuplicateMetric(format!(
                    "{name} (registered as {}, requested {})",
                    existing.as_str(),
                    requested.as_str()
                ))
            });
        }

        let desc = Desc::new(name, help, label_names)?;
        let handle = match kind {
            MetricKind::Counter => MetricHandle::Counter(Counter::new(desc)),
            MetricKind::Gauge => MetricHandle::Gauge(Gauge::new(desc)),
            MetricKind::Histogram(buckets) => {
                MetricHandle::Histogram(Histogram::new(desc, buckets)?)
            }
        };
        tracing::debug!(metric = %name, kind = handle.metric_type().as_str(), "metric registered");
        self.families.push(handle.clone());
        Ok(handle)
    }

    pub fn counter(&mut self, name: &str, help: &str, label_names: &[&str]) -> Result<Counter> {
        self.register(name, MetricKind::Counter, help, label_names)?
            .as_counter()
            .cloned()
    }

    pub fn gauge(&mut self, name: &str, help: &str, label_names: &[&str]) -> Result<Gauge> {
        self.register(name, MetricKind::Gauge, help, label_names)?
            .as_gauge()
            .cloned()
    }

    pub fn histogram(
        &mut self,
        name: &str,
        help: &str,
        label_names: &[&str],
        buckets: Buckets,
    ) -> Result<Histogram> {
        self.register(name, MetricKind::Histogram(buckets), help, label_names)?
            .as_histogram()
            .cloned()
    }

    /// Look up a family by name.
    pub fn get(&self, name: &str) -> Option<&MetricHandle> {
        self.families.iter().find(|f| f.desc().name == name)
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Copy every family in registration order, series sorted by label values.
    pub fn snapshot(&self) -> Vec<FamilySnapshot> {
        self.families.iter().map(MetricHandle::collect).collect()
    }

    /// Snapshot and encode in the text exposition format.
    pub fn render(&self) -> String {
        encode::encode_text(&self.snapshot())
    }
}
