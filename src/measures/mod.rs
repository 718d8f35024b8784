//! Measurement snapshots and the values derived from them
//!
//! This module covers everything between a raw history response and the
//! per-component record the rankings consume:
//! - `point`: measurement endpoints and guarded two-point deltas
//! - `ingest`: reduction of raw histories to (oldest, newest) pairs
//! - `composite`: normalized indicators computed from several base measurements
//! - `diff`: the per-component record itself

pub mod composite;
pub mod diff;
pub mod ingest;
pub mod point;

pub use composite::{derive_composites, CompositeIndicator, CostContributor};
pub use diff::{Component, ComponentDiff};
pub use ingest::{ingest, MeasureHistory, RawSample, SnapshotResponse};
pub use point::{DiffEntry, MeasurementPoint};

/// Lines of code, the code volume measurement
pub const NCLOC: &str = "ncloc";

/// Line coverage in percent
pub const COVERAGE: &str = "coverage";

/// Technical debt remediation effort in minutes
pub const SQALE_INDEX: &str = "sqale_index";

/// Number of open security hotspots
pub const SECURITY_HOTSPOTS: &str = "security_hotspots";
