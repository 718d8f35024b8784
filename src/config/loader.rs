//! Configuration file loading and saving

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::error::SonarRankError;
use crate::infra::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading and saving configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from .sonar-rank.toml in the given directory
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sonar_rank::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Ranking the top {}", config.top_count);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(project_root: &Path) -> Result<ConfigFile> {
        Self::load_with_fs(project_root, &RealFileSystem)
    }

    /// Load config with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(project_root: &Path, fs: &FS) -> Result<ConfigFile> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        // Read file atomically - no TOCTOU race window
        let contents = match fs.read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(e).context("Failed to read .sonar-rank.toml");
            }
        };

        Self::parse(&contents).context("Failed to parse .sonar-rank.toml")
    }

    /// Load an explicitly named config file; a missing file is an error
    pub fn load_from(path: &Path) -> Result<ConfigFile> {
        Self::load_from_with_fs(path, &RealFileSystem)
    }

    /// Load an explicitly named config file with a custom filesystem
    pub fn load_from_with_fs<FS: FileSystem>(path: &Path, fs: &FS) -> Result<ConfigFile> {
        let contents = fs
            .read_to_string(path)
            .map_err(|source| SonarRankError::ConfigNotFound {
                path: path.to_path_buf(),
                source,
            })?;

        Self::parse(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Values are not validated here, so command-line overrides can still
    /// replace them; call [`ConfigFile::validate`] once they are applied.
    fn parse(contents: &str) -> Result<ConfigFile> {
        Ok(toml_edit::de::from_str(contents)?)
    }

    /// Save config to .sonar-rank.toml in the given directory
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sonar_rank::config::{ConfigFile, ConfigLoader};
    /// use std::path::Path;
    ///
    /// let mut config = ConfigFile::default();
    /// config.top_count = 10;
    /// ConfigLoader::save(&config, Path::new("."))?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn save(config: &ConfigFile, project_root: &Path) -> Result<()> {
        Self::save_with_fs(config, project_root, &RealFileSystem)
    }

    /// Save config with a custom filesystem implementation
    pub fn save_with_fs<FS: FileSystem>(
        config: &ConfigFile,
        project_root: &Path,
        fs: &FS,
    ) -> Result<()> {
        fs.create_dir_all(project_root)
            .context("Failed to create config directory")?;

        let config_path = project_root.join(CONFIG_FILE_NAME);

        let contents =
            toml_edit::ser::to_string_pretty(config).context("Failed to serialize config")?;

        fs.write(&config_path, contents)
            .context("Failed to write .sonar-rank.toml")?;

        Ok(())
    }

    /// Check if config file exists in project
    pub fn exists(project_root: &Path) -> bool {
        RealFileSystem.exists(&project_root.join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct MockFileSystem {
        file_content: Option<String>,
        should_fail_read: bool,
        should_fail_write: bool,
        written_content: parking_lot::Mutex<Option<String>>,
    }

    impl MockFileSystem {
        fn new() -> Self {
            Self {
                file_content: None,
                should_fail_read: false,
                should_fail_write: false,
                written_content: parking_lot::Mutex::new(None),
            }
        }

        fn with_content(content: &str) -> Self {
            Self {
                file_content: Some(content.to_string()),
                ..Self::new()
            }
        }

        fn with_read_error() -> Self {
            Self {
                should_fail_read: true,
                ..Self::new()
            }
        }

        fn with_write_error() -> Self {
            Self {
                should_fail_write: true,
                ..Self::new()
            }
        }

        fn get_written_content(&self) -> Option<String> {
            self.written_content.lock().clone()
        }
    }

    impl FileSystem for MockFileSystem {
        fn read_to_string(&self, _path: &Path) -> io::Result<String> {
            if self.should_fail_read {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            self.file_content
                .clone()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "file not found"))
        }

        fn write(&self, _path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
            if self.should_fail_write {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "permission denied",
                ));
            }
            let contents_str = String::from_utf8_lossy(contents.as_ref()).to_string();
            *self.written_content.lock() = Some(contents_str);
            Ok(())
        }

        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            Ok(())
        }

        fn exists(&self, _path: &Path) -> bool {
            self.file_content.is_some()
        }
    }

    #[test]
    fn test_loader_loads_from_valid_toml() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join(CONFIG_FILE_NAME);

        let toml_content = r#"
window-days = 30
top-count = 10
dashboard-url = "https://sonar.example.com/dashboard?id="
criteria = ["coverage", "debt"]
"#;
        std::fs::write(&config_path, toml_content).unwrap();

        let config = ConfigLoader::load(temp.path()).unwrap();
        assert_eq!(config.window_days, 30);
        assert_eq!(config.top_count, 10);
        assert_eq!(
            config.dashboard_url.as_deref(),
            Some("https://sonar.example.com/dashboard?id=")
        );
        assert_eq!(config.resolve_criteria().unwrap().len(), 2);
    }

    #[test]
    fn test_loader_with_missing_file_uses_defaults() {
        let fs = MockFileSystem::new();
        let config = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_loader_with_invalid_toml_returns_error() {
        let fs = MockFileSystem::with_content("invalid { toml syntax");
        let result = ConfigLoader::load_with_fs(Path::new("/test"), &fs);
        assert!(result.is_err(), "Expected error for invalid TOML");
    }

    #[test]
    fn test_loader_leaves_value_checks_to_validate() {
        let fs = MockFileSystem::with_content("top-count = 0");
        let config = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap();
        assert_eq!(config.top_count, 0);

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("top-count"));
    }

    #[test]
    fn test_loader_with_permission_error_returns_error() {
        let fs = MockFileSystem::with_read_error();
        let result = ConfigLoader::load_with_fs(Path::new("/test"), &fs);

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to read"));
    }

    #[test]
    fn test_load_from_missing_file_is_config_not_found() {
        let fs = MockFileSystem::new();
        let err = ConfigLoader::load_from_with_fs(Path::new("custom.toml"), &fs).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SonarRankError>(),
            Some(SonarRankError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_save_writes_valid_toml() {
        let config = ConfigFile {
            top_count: 7,
            ..Default::default()
        };

        let fs = MockFileSystem::new();
        ConfigLoader::save_with_fs(&config, Path::new("/test"), &fs).unwrap();

        let content = fs.get_written_content().expect("config should be written");
        assert!(content.contains("top-count = 7"));
        assert!(content.contains("required-metric"));
    }

    #[test]
    fn test_save_with_write_error_returns_error() {
        let config = ConfigFile::default();
        let fs = MockFileSystem::with_write_error();
        let result = ConfigLoader::save_with_fs(&config, Path::new("/test"), &fs);

        assert!(result.is_err());
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to write"));
    }

    #[test]
    fn test_save_and_load_preserves_all_fields() {
        let temp = tempfile::tempdir().unwrap();

        let config = ConfigFile {
            window_days: 14,
            threads: Some(4),
            shuffle: false,
            dashboard_url: Some("https://sonar.example.com/dashboard?id=".to_string()),
            criteria: Some(vec!["debt-density".to_string()]),
            ..Default::default()
        };

        ConfigLoader::save(&config, temp.path()).unwrap();
        let loaded = ConfigLoader::load(temp.path()).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_exists_tracks_saved_file() {
        let temp = tempfile::tempdir().unwrap();
        assert!(!ConfigLoader::exists(temp.path()));

        ConfigLoader::save(&ConfigFile::default(), temp.path()).unwrap();
        assert!(ConfigLoader::exists(temp.path()));
    }

    #[test]
    fn test_loader_handles_empty_file() {
        let fs = MockFileSystem::with_content("");
        let config = ConfigLoader::load_with_fs(Path::new("/test"), &fs).unwrap();
        assert_eq!(config, ConfigFile::default());
    }
}
