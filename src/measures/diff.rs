//! Per-component derived records

use super::point::DiffEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A tracked component (project or application)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Unique component key
    pub key: String,
    /// Display name
    pub name: String,
    /// Component qualifier (`TRK` for projects, `APP` for applications)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
}

impl Component {
    /// Create a component without a qualifier
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            qualifier: None,
        }
    }
}

/// Derived measurements of one component over the trailing window
///
/// A measurement absent from `measures` was not analyzed in the window.
/// Composite indicators live in the same mapping as base measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDiff {
    /// Key of the component
    pub component_key: String,
    /// Display name of the component
    pub component_name: String,
    /// Measurement name to endpoints and deltas
    pub measures: BTreeMap<String, DiffEntry>,
}

impl ComponentDiff {
    /// Create an empty record for a component
    pub fn new(component: &Component) -> Self {
        Self {
            component_key: component.key.clone(),
            component_name: component.name.clone(),
            measures: BTreeMap::new(),
        }
    }

    /// Look up a measurement
    pub fn measure(&self, name: &str) -> Option<&DiffEntry> {
        self.measures.get(name)
    }

    /// Newest value of a measurement, if analyzed
    pub fn new_value(&self, name: &str) -> Option<f64> {
        self.measure(name).and_then(DiffEntry::new_value)
    }

    /// Add or replace a measurement
    pub fn insert(&mut self, name: impl Into<String>, entry: DiffEntry) {
        self.measures.insert(name.into(), entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measures::point::MeasurementPoint;

    #[test]
    fn test_new_diff_copies_identity_and_starts_empty() {
        let component = Component::new("org:app", "App");
        let diff = ComponentDiff::new(&component);
        assert_eq!(diff.component_key, "org:app");
        assert_eq!(diff.component_name, "App");
        assert!(diff.measures.is_empty());
    }

    #[test]
    fn test_new_value_reads_newest_endpoint() {
        let mut diff = ComponentDiff::new(&Component::new("k", "n"));
        diff.insert(
            "coverage",
            DiffEntry::new(
                MeasurementPoint::new("2024-01-01", Some(10.0)),
                MeasurementPoint::new("2024-02-01", Some(12.5)),
            ),
        );
        assert_eq!(diff.new_value("coverage"), Some(12.5));
        assert_eq!(diff.new_value("ncloc"), None);
    }
}
