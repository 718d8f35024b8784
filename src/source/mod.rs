//! Collaborators supplying components and their measurement histories
//!
//! The ranking core never talks to a server directly. It consumes a
//! [`ComponentDirectory`] for the list of components and a [`HistorySource`]
//! for each component's history. [`SnapshotDirectory`] implements both on
//! top of an exported directory of server responses.

mod snapshot_dir;

pub use snapshot_dir::{file_safe_key, SnapshotDirectory, COMPONENTS_FILE, HISTORY_DIR};

use crate::measures::{Component, SnapshotResponse};
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a collaborator
#[derive(Error, Debug)]
pub enum SourceError {
    /// Reading a file failed
    #[error("failed to read {path}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// A file did not hold the expected JSON document
    #[error("failed to parse {path}")]
    Parse {
        /// File that could not be parsed
        path: PathBuf,
        #[source]
        /// JSON error source
        source: serde_json::Error,
    },

    /// The source has no history for the component
    #[error("no history exported for component '{0}'")]
    MissingHistory(String),

    /// Failure reported by a custom collaborator
    #[error("{0}")]
    Other(String),
}

/// Lists the components to rank
pub trait ComponentDirectory: Send + Sync {
    /// Every component of interest
    fn list_components(&self) -> Result<Vec<Component>, SourceError>;
}

/// Supplies raw measurement histories
pub trait HistorySource: Send + Sync {
    /// Samples of `metrics` for `component`, dated on or after `window_start`
    fn fetch_history(
        &self,
        component: &Component,
        metrics: &[String],
        window_start: NaiveDate,
    ) -> Result<SnapshotResponse, SourceError>;
}
