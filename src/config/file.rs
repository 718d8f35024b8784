//! Configuration file data structures

use crate::error::SonarRankError;
use crate::measures::{COVERAGE, NCLOC, SECURITY_HOTSPOTS, SQALE_INDEX};
use crate::ranking::Criterion;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".sonar-rank.toml";

/// sonar-rank configuration file structure
///
/// Every key is optional; missing keys take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConfigFile {
    /// Length of the trailing window in days
    pub window_days: u32,

    /// Maximum entries per ranking
    pub top_count: usize,

    /// Measurement a component must have been analyzed for to be ranked at all
    pub required_metric: String,

    /// Base measurements requested for every component
    pub metrics: Vec<String>,

    /// Component qualifiers to include (empty = all)
    pub qualifiers: Vec<String>,

    /// Prefix a component key is appended to for a dashboard link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard_url: Option<String>,

    /// Worker threads fetching histories (default: one per CPU)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,

    /// Randomize dispatch order so early partial rankings are not biased
    pub shuffle: bool,

    /// Criteria to run, in order (default: all built-in criteria)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Vec<String>>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            window_days: 90,
            top_count: 5,
            required_metric: COVERAGE.to_string(),
            metrics: [COVERAGE, SQALE_INDEX, NCLOC, SECURITY_HOTSPOTS]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            qualifiers: vec!["APP".to_string(), "TRK".to_string()],
            dashboard_url: None,
            threads: None,
            shuffle: true,
            criteria: None,
        }
    }
}

impl ConfigFile {
    /// Check value ranges and cross-field consistency
    pub fn validate(&self) -> Result<(), SonarRankError> {
        if self.top_count == 0 {
            return Err(invalid("top-count must be at least 1"));
        }
        if self.window_days == 0 {
            return Err(invalid("window-days must be at least 1"));
        }
        if self.threads == Some(0) {
            return Err(invalid("threads must be at least 1"));
        }
        if self.metrics.is_empty() {
            return Err(invalid("metrics must name at least one measurement"));
        }
        if !self.metrics.contains(&self.required_metric) {
            return Err(invalid(&format!(
                "required-metric '{}' is not among the requested metrics",
                self.required_metric
            )));
        }
        self.resolve_criteria()?;
        Ok(())
    }

    /// Criteria selected by name, or all built-in criteria
    pub fn resolve_criteria(&self) -> Result<Vec<&'static Criterion>, SonarRankError> {
        match &self.criteria {
            None => Ok(Criterion::all().collect()),
            Some(names) if names.is_empty() => Err(invalid("criteria must not be empty")),
            Some(names) => names
                .iter()
                .map(|name| {
                    Criterion::find(name).ok_or_else(|| SonarRankError::UnknownCriterion {
                        name: name.clone(),
                        available: Criterion::names(),
                    })
                })
                .collect(),
        }
    }

    /// First day of the trailing window ending on `today`
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use sonar_rank::config::ConfigFile;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
    /// let start = ConfigFile::default().window_start(today).unwrap();
    /// assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    /// ```
    pub fn window_start(&self, today: NaiveDate) -> Result<NaiveDate, SonarRankError> {
        today
            .checked_sub_days(Days::new(u64::from(self.window_days)))
            .ok_or_else(|| invalid("window-days reaches before the supported calendar range"))
    }
}

fn invalid(reason: &str) -> SonarRankError {
    SonarRankError::InvalidConfig {
        reason: reason.to_string(),
    }
}
