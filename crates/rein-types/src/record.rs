//! The watched configuration record and its annotation/label wire keys
//!
//! A ConfigRecord is the one typed shape the reconcile handler understands.
//! The dispatch collaborator converts from the generic wire representation
//! before delivery; anything that is not a ConfigRecord never reaches the
//! handler.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Label that opts a record into export handling.
pub const EXPORT_LABEL: &str = "LOGGER";

/// Annotation carrying the export trigger state.
pub const EXPORT_ANNOTATION: &str = "log";

/// Annotation value written back after a successful export.
pub const EXPORT_DONE: &str = "done";

/// Annotation requesting a process-wide lifecycle phase change.
pub const PHASE_ANNOTATION: &str = "DEBUG_LASSO_KIND";

/// Label or annotation value that disables handling.
pub const IGNORE_VALUE: &str = "ignore";

/// Phase reported for registrations made before any phase change.
pub const INITIAL_PHASE: &str = "initialization";

/// Identity recorded for handlers registered without a resource string.
pub const MATCHER_IDENTITY: &str = "using_matcher";

/// A cluster-style key-value configuration record.
///
/// Maps are ordered so serialized records iterate deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    /// Namespace the record lives in.
    pub namespace: String,

    /// Record name, unique within its namespace.
    pub name: String,

    /// Store revision used for optimistic-concurrency matching.
    #[serde(default)]
    pub resource_version: String,

    /// Record labels.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    /// Record annotations.
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,

    /// Record payload.
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl ConfigRecord {
    /// Create an empty record in a namespace.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set a label.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Set an annotation.
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    /// Look up a label value.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Look up an annotation value.
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accessors() {
        let record = ConfigRecord::new("kube-system", "tracing-config")
            .with_label(EXPORT_LABEL, "on")
            .with_annotation(EXPORT_ANNOTATION, "operator");

        assert_eq!(record.label(EXPORT_LABEL), Some("on"));
        assert_eq!(record.annotation(EXPORT_ANNOTATION), Some("operator"));
        assert_eq!(record.label("missing"), None);
        assert_eq!(record.annotation("missing"), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let record = ConfigRecord::new("default", "cfg").with_label("a", "b");
        let json = serde_json::to_string(&record).unwrap();
        let back: ConfigRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
