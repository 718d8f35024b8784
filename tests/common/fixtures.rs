//! Test fixture helpers for creating export directories
//!
//! Builds directories with a `components.json` listing and one
//! `history/<key>.json` file per component, with sample dates relative to
//! today so they fall inside (or outside) the default trailing window.

#![allow(dead_code)]

use chrono::{Days, Local};
use serde_json::{json, Value};
use sonar_rank::source::{file_safe_key, COMPONENTS_FILE, HISTORY_DIR};
use std::fs;
use tempfile::TempDir;

/// Samples of one metric as (days ago, value)
pub type Samples<'a> = &'a [(u64, f64)];

/// Timestamp of a sample taken `days_ago` days before today
pub fn sample_date(days_ago: u64) -> String {
    let day = Local::now()
        .date_naive()
        .checked_sub_days(Days::new(days_ago))
        .expect("date in range");
    format!("{}T08:00:00+0000", day.format("%Y-%m-%d"))
}

/// Builder for an export directory
pub struct ExportBuilder {
    dir: TempDir,
    components: Vec<Value>,
}

impl ExportBuilder {
    /// Start an empty export
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir_all(dir.path().join(HISTORY_DIR)).expect("Failed to create history dir");
        Self {
            dir,
            components: Vec::new(),
        }
    }

    /// Add a project (`TRK`) with histories for the given metrics
    pub fn component(self, key: &str, name: &str, measures: &[(&str, Samples<'_>)]) -> Self {
        self.component_with_qualifier(key, name, "TRK", measures)
    }

    /// Add a component with an explicit qualifier
    pub fn component_with_qualifier(
        self,
        key: &str,
        name: &str,
        qualifier: &str,
        measures: &[(&str, Samples<'_>)],
    ) -> Self {
        let measures: Vec<Value> = measures
            .iter()
            .map(|(metric, samples)| {
                let history: Vec<Value> = samples
                    .iter()
                    .map(|(days_ago, value)| {
                        json!({"date": sample_date(*days_ago), "value": value.to_string()})
                    })
                    .collect();
                json!({"metric": metric, "history": history})
            })
            .collect();

        let path = self
            .dir
            .path()
            .join(HISTORY_DIR)
            .join(format!("{}.json", file_safe_key(key)));
        fs::write(path, json!({ "measures": measures }).to_string())
            .expect("Failed to write history");

        self.listed(key, name, qualifier)
    }

    /// Add a component that is listed but has no exported history
    pub fn component_without_history(self, key: &str, name: &str) -> Self {
        self.listed(key, name, "TRK")
    }

    fn listed(mut self, key: &str, name: &str, qualifier: &str) -> Self {
        self.components
            .push(json!({"key": key, "name": name, "qualifier": qualifier}));
        self
    }

    /// Write the component listing and hand over the directory
    pub fn build(self) -> TempDir {
        fs::write(
            self.dir.path().join(COMPONENTS_FILE),
            json!({ "components": self.components }).to_string(),
        )
        .expect("Failed to write components.json");
        self.dir
    }
}

impl Default for ExportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Two projects with coverage, debt and the composite inputs, plus one
/// listed project whose history is missing
pub fn standard_export() -> TempDir {
    ExportBuilder::new()
        .component(
            "org:billing",
            "Billing",
            &[
                ("coverage", &[(60, 70.0), (5, 80.0)]),
                ("sqale_index", &[(60, 1200.0), (5, 900.0)]),
                ("ncloc", &[(60, 10000.0), (5, 12000.0)]),
                ("security_hotspots", &[(60, 4.0), (5, 2.0)]),
            ],
        )
        .component(
            "org:search",
            "Search",
            &[
                ("coverage", &[(60, 90.0), (5, 85.0)]),
                ("sqale_index", &[(60, 300.0), (5, 600.0)]),
                ("ncloc", &[(60, 3000.0), (5, 3000.0)]),
                ("security_hotspots", &[(60, 0.0), (5, 0.0)]),
            ],
        )
        .component_without_history("org:legacy", "Legacy")
        .build()
}
