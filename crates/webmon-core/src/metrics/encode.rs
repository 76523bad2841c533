//! Prometheus text exposition format (0.0.4).

use std::fmt::Write;

use super::snapshot::{FamilySnapshot, SeriesValue};

/// Content type scrapers expect for this format.
pub const TEXT_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Sample values: non-finite values use the format's spellings.
fn fmt_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v == f64::INFINITY {
        "+Inf".into()
    } else if v == f64::NEG_INFINITY {
        "-Inf".into()
    } else {
        v.to_string()
    }
}

/// Bucket bounds keep a decimal point (`1.0`, `0.005`).
fn fmt_le(v: f64) -> String {
    if v == f64::INFINITY {
        "+Inf".into()
    } else {
        format!("{v:?}")
    }
}

/// `{a="x",b="y"}` or the empty string when there are no labels.
fn label_set(names: &[String], values: &[String], extra: Option<(&str, &str)>) -> String {
    let mut parts: Vec<String> = names
        .iter()
        .zip(values)
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect();
    if let Some((k, v)) = extra {
        parts.push(format!("{}=\"{}\"", k, escape_label(v)));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", parts.join(","))
    }
}

/// Encode a registry snapshot.
pub fn encode_text(families: &[FamilySnapshot]) -> String {
    let mut out = String::new();
    for family in families {
        let name = &family.name;
        let _ = writeln!(out, "# HELP {} {}", name, escape_help(&family.help));
        let _ = writeln!(out, "# TYPE {} {}", name, family.kind.as_str());

        for series in &family.series {
            let labels = label_set(&family.label_names, &series.label_values, None);
            match &series.value {
                SeriesValue::Counter(v) => {
                    let _ = writeln!(out, "{}{} {}", name, labels, v);
                }
                SeriesValue::Gauge(v) => {
                    let _ = writeln!(out, "{}{} {}", name, labels, fmt_value(*v));
                }
                SeriesValue::Histogram(h) => {
                    for (le, count) in &h.buckets {
                        let le = fmt_le(*le);
                        let bucket_labels = label_set(
                            &family.label_names,
                            &series.label_values,
                            Some(("le", le.as_str())),
                        );
                        let _ = writeln!(out, "{}_bucket{} {}", name, bucket_labels, count);
                    }
                    let _ = writeln!(out, "{}_sum{} {}", name, labels, fmt_value(h.sum));
                    let _ = writeln!(out, "{}_count{} {}", name, labels, h.count);
                }
            }
        }
    }
    out
}
