//! Metric descriptors and name validation.

use crate::error::{Result, WebmonError};

/// Immutable identity of a metric family: name, help text and label dimensions.
#[derive(Debug, Clone)]
pub struct Desc {
    pub name: String,
    pub help: String,
    pub label_names: Vec<String>,
}

impl Desc {
    pub(crate) fn new(name: &str, help: &str, label_names: &[&str]) -> Result<Self> {
        if !is_metric_name(name) {
            return Err(WebmonError::InvalidName(format!("metric name {name:?}")));
        }
        for (i, label) in label_names.iter().enumerate() {
            if !is_label_name(label) {
                return Err(WebmonError::InvalidName(format!(
                    "label name {label:?} on {name}"
                )));
            }
            if label_names[..i].contains(label) {
                return Err(WebmonError::InvalidName(format!(
                    "duplicate label name {label:?} on {name}"
                )));
            }
        }
        Ok(Self {
            name: name.to_string(),
            help: help.to_string(),
            label_names: label_names.iter().map(|l| l.to_string()).collect(),
        })
    }

    /// Turn observed label values into a series key, checking arity.
    pub(crate) fn series_key(&self, values: &[&str]) -> Result<Vec<String>> {
        if values.len() != self.label_names.len() {
            return Err(WebmonError::LabelArity {
                metric: self.name.clone(),
                expected: self.label_names.len(),
                got: values.len(),
            });
        }
        Ok(values.iter().map(|v| v.to_string()).collect())
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
fn is_metric_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, with the `__` prefix reserved.
fn is_label_name(s: &str) -> bool {
    if s.starts_with("__") {
        return false;
    }
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
