//! Directory of exported server responses
//!
//! Layout:
//!
//! ```text
//! <root>/components.json           {"components": [{"key", "name", "qualifier"}]}
//! <root>/history/<file-safe key>.json  {"measures": [{"metric", "history": [...]}]}
//! ```

use super::{ComponentDirectory, HistorySource, SourceError};
use crate::infra::{FileSystem, RealFileSystem};
use crate::measures::{Component, SnapshotResponse};
use chrono::NaiveDate;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Component listing file name
pub const COMPONENTS_FILE: &str = "components.json";

/// Directory holding one history file per component
pub const HISTORY_DIR: &str = "history";

#[derive(Deserialize)]
struct ComponentList {
    #[serde(default)]
    components: Vec<Component>,
}

/// File-backed component directory and history source
pub struct SnapshotDirectory<FS: FileSystem = RealFileSystem> {
    root: PathBuf,
    qualifiers: Vec<String>,
    fs: FS,
}

impl SnapshotDirectory<RealFileSystem> {
    /// Open an export directory on the real filesystem
    pub fn new(root: impl Into<PathBuf>, qualifiers: Vec<String>) -> Self {
        Self::with_fs(root, qualifiers, RealFileSystem)
    }
}

impl<FS: FileSystem> SnapshotDirectory<FS> {
    /// Open an export directory through a custom filesystem
    pub fn with_fs(root: impl Into<PathBuf>, qualifiers: Vec<String>, fs: FS) -> Self {
        Self {
            root: root.into(),
            qualifiers,
            fs,
        }
    }

    /// Export root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a component's history file
    pub fn history_path(&self, component_key: &str) -> PathBuf {
        self.root
            .join(HISTORY_DIR)
            .join(format!("{}.json", file_safe_key(component_key)))
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<T, SourceError> {
        let contents = self
            .fs
            .read_to_string(path)
            .map_err(|source| SourceError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&contents).map_err(|source| SourceError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn accepts(&self, component: &Component) -> bool {
        if self.qualifiers.is_empty() {
            return true;
        }
        match &component.qualifier {
            Some(q) => self.qualifiers.iter().any(|accepted| accepted == q),
            None => true,
        }
    }
}

impl<FS: FileSystem> ComponentDirectory for SnapshotDirectory<FS> {
    fn list_components(&self) -> Result<Vec<Component>, SourceError> {
        let list: ComponentList = self.read_json(&self.root.join(COMPONENTS_FILE))?;
        let total = list.components.len();
        let components: Vec<Component> = list
            .components
            .into_iter()
            .filter(|c| self.accepts(c))
            .collect();
        debug!(
            "{} of {} components match qualifiers {:?}",
            components.len(),
            total,
            self.qualifiers
        );
        Ok(components)
    }
}

impl<FS: FileSystem> HistorySource for SnapshotDirectory<FS> {
    fn fetch_history(
        &self,
        component: &Component,
        metrics: &[String],
        window_start: NaiveDate,
    ) -> Result<SnapshotResponse, SourceError> {
        let path = self.history_path(&component.key);
        if !self.fs.exists(&path) {
            return Err(SourceError::MissingHistory(component.key.clone()));
        }

        let mut response: SnapshotResponse = self.read_json(&path)?;
        response
            .measures
            .retain(|m| metrics.iter().any(|requested| *requested == m.metric));
        for measure in &mut response.measures {
            measure
                .history
                .retain(|sample| sample_day(&sample.date).is_none_or(|day| day >= window_start));
        }
        Ok(response)
    }
}

/// File name stem for a component key
///
/// Percent-encodes everything but ASCII alphanumerics and `-_.~`, so distinct
/// keys never share a history file.
///
/// ```
/// use sonar_rank::source::file_safe_key;
///
/// assert_eq!(file_safe_key("org.example:billing-api"), "org.example%3Abilling-api");
/// assert_ne!(file_safe_key("org:a"), file_safe_key("org_a"));
/// ```
pub fn file_safe_key(key: &str) -> String {
    urlencoding::encode(key).into_owned()
}

/// Calendar day of a timestamp; undated samples are kept by the window filter
fn sample_day(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.get(..10)?, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;

    #[derive(Default)]
    struct MemoryFileSystem {
        files: HashMap<PathBuf, String>,
    }

    impl MemoryFileSystem {
        fn with(mut self, path: &str, contents: &str) -> Self {
            self.files.insert(PathBuf::from(path), contents.to_string());
            self
        }
    }

    impl FileSystem for MemoryFileSystem {
        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            Ok(())
        }

        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "not found"))
        }

        fn write(&self, _path: &Path, _contents: impl AsRef<[u8]>) -> io::Result<()> {
            unimplemented!()
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.contains_key(path)
        }
    }

    const HISTORY: &str = r#"{
        "measures": [
            {"metric": "coverage", "history": [
                {"date": "2023-12-01T00:00:00+0000", "value": "40.0"},
                {"date": "2024-02-01T00:00:00+0000", "value": "50.0"},
                {"date": "2024-03-01T00:00:00+0000", "value": "55.0"}
            ]},
            {"metric": "ncloc", "history": [
                {"date": "2024-02-01T00:00:00+0000", "value": "1200"}
            ]},
            {"metric": "bugs", "history": [
                {"date": "2024-02-01T00:00:00+0000", "value": "3"}
            ]}
        ]
    }"#;

    fn window_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_list_components_filters_by_qualifier() {
        let fs = MemoryFileSystem::default().with(
            "/export/components.json",
            r#"{"components": [
                {"key": "a", "name": "A", "qualifier": "TRK"},
                {"key": "b", "name": "B", "qualifier": "VW"},
                {"key": "c", "name": "C", "qualifier": "APP"}
            ]}"#,
        );
        let dir = SnapshotDirectory::with_fs("/export", vec!["APP".into(), "TRK".into()], fs);

        let keys: Vec<String> = dir
            .list_components()
            .unwrap()
            .into_iter()
            .map(|c| c.key)
            .collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_list_components_missing_file_is_io_error() {
        let dir = SnapshotDirectory::with_fs("/export", vec![], MemoryFileSystem::default());
        assert!(matches!(
            dir.list_components(),
            Err(SourceError::Io { .. })
        ));
    }

    #[test]
    fn test_keys_differing_only_in_separator_read_their_own_history() {
        let fs = MemoryFileSystem::default()
            .with(
                "/export/history/org%3Aa.json",
                r#"{"measures": [{"metric": "coverage", "history": [
                    {"date": "2024-02-01T00:00:00+0000", "value": "10"}
                ]}]}"#,
            )
            .with(
                "/export/history/org_a.json",
                r#"{"measures": [{"metric": "coverage", "history": [
                    {"date": "2024-02-01T00:00:00+0000", "value": "99"}
                ]}]}"#,
            );
        let dir = SnapshotDirectory::with_fs("/export", vec![], fs);
        let metrics = vec!["coverage".to_string()];

        let value_of = |key: &str| {
            let response = dir
                .fetch_history(&Component::new(key, key), &metrics, window_start())
                .unwrap();
            response.measures[0].history[0].numeric_value()
        };
        assert_eq!(value_of("org:a"), Some(10.0));
        assert_eq!(value_of("org_a"), Some(99.0));
    }

    #[test]
    fn test_file_safe_key_escapes_path_separators() {
        assert_eq!(file_safe_key("group/project"), "group%2Fproject");
        assert_eq!(file_safe_key("a%b"), "a%25b");
        assert_eq!(file_safe_key("plain-key_1.0"), "plain-key_1.0");
    }

    #[test]
    fn test_fetch_history_applies_metrics_and_window() {
        let fs = MemoryFileSystem::default().with("/export/history/org%3Aa.json", HISTORY);
        let dir = SnapshotDirectory::with_fs("/export", vec![], fs);
        let metrics = vec!["coverage".to_string(), "ncloc".to_string()];

        let response = dir
            .fetch_history(&Component::new("org:a", "A"), &metrics, window_start())
            .unwrap();

        assert_eq!(response.measures.len(), 2);
        let coverage = &response.measures[0];
        assert_eq!(coverage.history.len(), 2);
        assert_eq!(coverage.history[0].date, "2024-02-01T00:00:00+0000");
    }

    #[test]
    fn test_fetch_history_missing_file_reports_component() {
        let dir = SnapshotDirectory::with_fs("/export", vec![], MemoryFileSystem::default());
        let err = dir
            .fetch_history(&Component::new("org:gone", "Gone"), &[], window_start())
            .unwrap_err();
        assert!(matches!(err, SourceError::MissingHistory(ref key) if key == "org:gone"));
    }

    #[test]
    fn test_fetch_history_invalid_json_is_parse_error() {
        let fs = MemoryFileSystem::default().with("/export/history/a.json", "{not json");
        let dir = SnapshotDirectory::with_fs("/export", vec![], fs);
        let err = dir
            .fetch_history(&Component::new("a", "A"), &[], window_start())
            .unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[test]
    fn test_sample_day_parses_prefix() {
        assert_eq!(
            sample_day("2024-02-29T23:59:59+0100"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(sample_day("yesterday"), None);
    }
}
