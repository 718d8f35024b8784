#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! sonar-rank library
//!
//! This library turns measurement histories of many components into
//! per-component change records and ranks them. It can be used
//! programmatically in addition to the CLI interface.
//!
//! # Basic Example
//!
//! Ingesting a history response and ranking by newest coverage:
//!
//! ```
//! use sonar_rank::measures::{ingest, Component, SnapshotResponse};
//! use sonar_rank::ranking::top_n;
//!
//! let response: SnapshotResponse = serde_json::from_str(r#"{
//!     "measures": [{
//!         "metric": "coverage",
//!         "history": [
//!             {"date": "2024-01-02T09:00:00+0000", "value": "71.5"},
//!             {"date": "2024-03-28T09:00:00+0000", "value": "78.0"}
//!         ]
//!     }]
//! }"#).unwrap();
//!
//! let billing = ingest(&Component::new("org:billing", "Billing"), &response);
//! let entry = billing.measure("coverage").unwrap();
//! assert_eq!(entry.delta_absolute, Some(6.5));
//!
//! // Highest coverage first: rank ascending by the negated value
//! let ranked = top_n([&billing], 5, "coverage", |d| d.new_value("coverage").map(|v| -v));
//! assert_eq!(ranked[0].component_key, "org:billing");
//! ```
//!
//! # Advanced Example: Composite Indicators
//!
//! Remediation hours per thousand lines need every input at both endpoints:
//!
//! ```
//! use sonar_rank::measures::{
//!     derive_composites, Component, ComponentDiff, CompositeIndicator, DiffEntry,
//!     MeasurementPoint,
//! };
//!
//! let mut diff = ComponentDiff::new(&Component::new("org:api", "API"));
//! for (metric, old, new) in [("ncloc", 1000.0, 2000.0), ("sqale_index", 600.0, 600.0)] {
//!     diff.insert(metric, DiffEntry::new(
//!         MeasurementPoint::new("2024-01-02", Some(old)),
//!         MeasurementPoint::new("2024-03-28", Some(new)),
//!     ));
//! }
//!
//! // security_hotspots is missing, so nothing is derived
//! derive_composites(&mut diff, &CompositeIndicator::defaults());
//! assert!(diff.measure("remediation_hours_per_kloc").is_none());
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file model and loading
pub mod config;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem access
pub mod infra;
/// Measurement records, deltas and composite indicators
pub mod measures;
/// Completeness filtering and top-N rankings
pub mod ranking;
/// Presentation sinks
pub mod report;
/// Concurrent acquisition with incremental re-ranking
pub mod session;
/// Component and history collaborators
pub mod source;
