//! Reduction of raw measurement histories to (oldest, newest) pairs
//!
//! The raw response mirrors the shape of the server's history endpoint:
//!
//! ```json
//! {"measures": [{"metric": "coverage", "history": [{"date": "...", "value": "81.2"}]}]}
//! ```

use super::diff::{Component, ComponentDiff};
use super::point::{finite, DiffEntry, MeasurementPoint};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw history response for one component
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotResponse {
    /// One history per requested base measurement
    #[serde(default)]
    pub measures: Vec<MeasureHistory>,
}

/// Ordered samples of one base measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasureHistory {
    /// Measurement name
    pub metric: String,
    /// Samples, oldest first; may be empty
    #[serde(default)]
    pub history: Vec<RawSample>,
}

/// One raw sample; the server reports values as strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSample {
    /// Sample timestamp
    pub date: String,
    /// Number, numeric string, or absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl RawSample {
    /// Numeric value of the sample, `None` if absent or malformed
    pub fn numeric_value(&self) -> Option<f64> {
        match self.value.as_ref()? {
            Value::Number(n) => n.as_f64().and_then(finite),
            Value::String(s) => s.trim().parse::<f64>().ok().and_then(finite),
            _ => None,
        }
    }

    fn to_point(&self) -> MeasurementPoint {
        MeasurementPoint::new(self.date.clone(), self.numeric_value())
    }
}

impl MeasureHistory {
    /// Reduce the history to its endpoints, `None` for an empty history
    pub fn to_diff_entry(&self) -> Option<DiffEntry> {
        let first = self.history.first()?;
        let last = self.history.last()?;
        let entry = match self.history.len() {
            1 => DiffEntry::single(first.to_point()),
            n => DiffEntry::new(first.to_point(), last.to_point()).with_samples(n),
        };
        Some(entry)
    }
}

/// Derive a component record from its raw history response
///
/// Measurements with no samples in the window are left out entirely.
///
/// # Examples
///
/// ```
/// use sonar_rank::measures::{ingest, Component, SnapshotResponse};
///
/// let response: SnapshotResponse = serde_json::from_str(r#"{
///     "measures": [
///         {"metric": "coverage", "history": [
///             {"date": "2024-01-01T00:00:00+0000", "value": "50.0"},
///             {"date": "2024-03-01T00:00:00+0000", "value": "55.0"}
///         ]},
///         {"metric": "ncloc", "history": []}
///     ]
/// }"#).unwrap();
///
/// let diff = ingest(&Component::new("key", "Name"), &response);
/// assert_eq!(diff.measure("coverage").unwrap().delta_absolute, Some(5.0));
/// assert!(diff.measure("ncloc").is_none());
/// ```
pub fn ingest(component: &Component, response: &SnapshotResponse) -> ComponentDiff {
    let mut diff = ComponentDiff::new(component);
    for measure in &response.measures {
        match measure.to_diff_entry() {
            Some(entry) => diff.insert(measure.metric.clone(), entry),
            None => debug!(
                "{}: no '{}' history in window",
                component.key, measure.metric
            ),
        }
    }
    diff
}
