//! Error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes and recovery actions
//! - Proper exit codes for scripting
//!
//! Missing or degenerate measurements are not errors: they are represented
//! as absent values and simply keep a component out of the affected rankings.
//!
//! # Examples
//!
//! ```
//! use sonar_rank::error::SonarRankError;
//! use sonar_rank::source::SourceError;
//!
//! let error = SonarRankError::HistoryFetch {
//!     component_key: "org:billing".to_string(),
//!     component_name: "Billing".to_string(),
//!     source: SourceError::MissingHistory("org:billing".to_string()),
//! };
//!
//! assert!(error.is_recoverable());
//! assert!(error.to_string().contains("Billing"));
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::source::SourceError;

/// sonar-rank errors with contextual suggestions
#[derive(Error, Debug)]
pub enum SonarRankError {
    /// The component listing could not be obtained; no ranking is possible
    #[error("Failed to list components")]
    DirectoryFetch(#[source] SourceError),

    /// One component's history could not be obtained
    #[error("Failed to load history for \"{component_name}\" ({component_key})")]
    HistoryFetch {
        /// Key of the failed component
        component_key: String,
        /// Display name of the failed component
        component_name: String,
        #[source]
        /// Underlying source error
        source: SourceError,
    },

    /// Explicitly requested configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to config file
        path: PathBuf,
        #[source]
        /// IO error source
        source: std::io::Error,
    },

    /// Configuration values are inconsistent
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong
        reason: String,
    },

    /// Unknown ranking criterion name
    #[error("Unknown ranking criterion: '{name}'")]
    UnknownCriterion {
        /// Name that was given
        name: String,
        /// Names of the built-in criteria
        available: Vec<String>,
    },

    /// Export directory or file not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to missing file
        path: PathBuf,
        /// Operation that required the file
        operation: String,
    },

    /// Worker pool could not be started
    #[error("Failed to start worker pool")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl SonarRankError {
    /// True for failures that only affect a single component
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::HistoryFetch { .. })
    }

    /// Message followed by every underlying cause, `: `-separated
    pub fn detailed(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use sonar_rank::error::SonarRankError;
    ///
    /// let error = SonarRankError::UnknownCriterion {
    ///     name: "speed".to_string(),
    ///     available: vec!["coverage".to_string(), "debt".to_string()],
    /// };
    ///
    /// let suggestion = error.suggestion().unwrap();
    /// assert!(suggestion.contains("coverage, debt"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::DirectoryFetch(_) => Some(
                "Check that the export directory contains a readable components.json".to_string(),
            ),
            Self::HistoryFetch { component_key, .. } => Some(format!(
                "Export the history of '{}' again or exclude it by qualifier",
                component_key
            )),
            Self::ConfigNotFound { .. } => {
                Some("Run 'sonar-rank init' to create a configuration file".to_string())
            }
            Self::InvalidConfig { .. } => {
                Some("Fix the value in .sonar-rank.toml or the command line".to_string())
            }
            Self::UnknownCriterion { available, .. } => {
                Some(format!("Available criteria: {}", available.join(", ")))
            }
            Self::FileNotFound { path, operation } => Some(format!(
                "Ensure {} exists before running {}",
                path.display(),
                operation
            )),
            Self::WorkerPool(_) => Some("Lower the 'threads' setting".to_string()),
            Self::Io { context, .. } => Some(format!(
                "Check that the {} is still open and writable",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Returns Unix-style exit codes following sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use sonar_rank::error::SonarRankError;
    ///
    /// let error = SonarRankError::InvalidConfig {
    ///     reason: "top-count must be positive".to_string(),
    /// };
    /// assert_eq!(error.exit_code(), 78); // EX_CONFIG
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DirectoryFetch(_) => 66,          // EX_NOINPUT
            Self::HistoryFetch { .. } => 65,        // EX_DATAERR
            Self::ConfigNotFound { .. } => 66,      // EX_NOINPUT
            Self::InvalidConfig { .. } => 78,       // EX_CONFIG
            Self::UnknownCriterion { .. } => 64,    // EX_USAGE
            Self::FileNotFound { .. } => 66,        // EX_NOINPUT
            Self::WorkerPool(_) => 71,              // EX_OSERR
            Self::Io { .. } => 74,                  // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestion
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(sr_error) = error.downcast_ref::<SonarRankError>() {
            if let Some(suggestion) = sr_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(sr_error) = error.downcast_ref::<SonarRankError>() {
            sr_error.exit_code()
        } else {
            1 // Generic error
        }
    }
}
