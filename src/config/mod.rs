//! Configuration for sonar-rank
//!
//! This module provides:
//! - The `.sonar-rank.toml` file model and its validation
//! - Loading and saving of the config file

pub mod file;
pub mod loader;

pub use file::{ConfigFile, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
