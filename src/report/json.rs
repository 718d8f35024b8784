//! Machine-readable ranking output

use super::RankingSink;
use crate::error::SonarRankError;
use crate::ranking::RankedList;
use crate::session::Progress;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::{self, Write};

/// A component left out of the rankings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureReport {
    /// Key of the component, when the failure concerns one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_key: Option<String>,
    /// Name of the component, when the failure concerns one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    /// Message including every cause
    pub message: String,
}

impl From<&SonarRankError> for FailureReport {
    fn from(error: &SonarRankError) -> Self {
        let (component_key, component_name) = match error {
            SonarRankError::HistoryFetch {
                component_key,
                component_name,
                ..
            } => (Some(component_key.clone()), Some(component_name.clone())),
            _ => (None, None),
        };
        Self {
            component_key,
            component_name,
            message: error.detailed(),
        }
    }
}

#[derive(Serialize)]
struct Document<'r> {
    window_start: NaiveDate,
    progress: Progress,
    rankings: &'r serde_json::Value,
    failures: &'r [FailureReport],
}

/// Writes one JSON document once the run is over
///
/// Only the most recent render is kept; intermediate renders are replaced.
pub struct JsonSink<W: Write> {
    out: W,
    window_start: NaiveDate,
    progress: Progress,
    rankings: serde_json::Value,
    failures: Vec<FailureReport>,
}

impl<W: Write> JsonSink<W> {
    /// Create a sink writing to `out`
    pub fn new(out: W, window_start: NaiveDate) -> Self {
        Self {
            out,
            window_start,
            progress: Progress::default(),
            rankings: serde_json::Value::Array(Vec::new()),
            failures: Vec::new(),
        }
    }

    /// Consume the sink, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RankingSink for JsonSink<W> {
    fn report_failure(&mut self, error: &SonarRankError) {
        self.failures.push(FailureReport::from(error));
    }

    fn render(&mut self, progress: &Progress, rankings: &[RankedList<'_>]) -> io::Result<()> {
        self.progress = *progress;
        self.rankings = serde_json::to_value(rankings)?;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        let document = Document {
            window_start: self.window_start,
            progress: self.progress,
            rankings: &self.rankings,
            failures: &self.failures,
        };
        serde_json::to_writer_pretty(&mut self.out, &document)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
