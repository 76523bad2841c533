//! Point-in-time copies of registry state, consumed by the encoder.

/// Kind of a metric family, as written on the `# TYPE` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
}

impl MetricType {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Counter => "counter",
            MetricType::Gauge => "gauge",
            MetricType::Histogram => "histogram",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// `(upper bound, cumulative count)`, ascending, last bound `+Inf`.
    pub buckets: Vec<(f64, u64)>,
    pub sum: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeriesValue {
    Counter(u64),
    Gauge(f64),
    Histogram(HistogramSnapshot),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSnapshot {
    pub label_values: Vec<String>,
    pub value: SeriesValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FamilySnapshot {
    pub name: String,
    pub help: String,
    pub kind: MetricType,
    pub label_names: Vec<String>,
    pub series: Vec<SeriesSnapshot>,
}

impl FamilySnapshot {
    /// Find a series by its label values.
    pub fn series(&self, label_values: &[&str]) -> Option<&SeriesValue> {
        self.series
            .iter()
            .find(|s| s.label_values.iter().map(String::as_str).eq(label_values.iter().copied()))
            .map(|s| &s.value)
    }
}

pub(crate) fn sorted(mut series: Vec<SeriesSnapshot>) -> Vec<SeriesSnapshot> {
    series.sort_by(|a, b| a.label_values.cmp(&b.label_values));
    series
}
