//! Human-readable ranking output

use super::RankingSink;
use crate::error::SonarRankError;
use crate::fmt::{self, dashboard_link, format_change, format_measure};
use crate::measures::{ComponentDiff, DiffEntry};
use crate::ranking::{Criterion, RankedList};
use crate::session::Progress;
use chrono::NaiveDate;
use console::style;
use std::io::{self, Write};

/// Writes rankings as plain text
///
/// ```text
/// === Top 5 Coverage ===
/// 1: "Billing" - "org:billing"
///      91.2% - @2024-03-28
///      88% - @2024-01-02
/// ```
pub struct ConsoleSink<W: Write> {
    out: W,
    window_start: NaiveDate,
    dashboard_url: Option<String>,
    failures: Vec<String>,
}

impl<W: Write> ConsoleSink<W> {
    /// Create a sink writing to `out`
    pub fn new(out: W, window_start: NaiveDate, dashboard_url: Option<String>) -> Self {
        Self {
            out,
            window_start,
            dashboard_url,
            failures: Vec::new(),
        }
    }

    /// Consume the sink, returning the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_header(&mut self, progress: &Progress) -> io::Result<()> {
        writeln!(
            self.out,
            "{} Components with changes since {} ({} of {} loaded)",
            fmt::CHART,
            style(self.window_start).bold(),
            progress.ingested,
            progress.total
        )
    }

    fn write_ranking(&mut self, list: &RankedList<'_>) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", style(format!("=== {} ===", list.title)).bold())?;

        if list.entries.is_empty() {
            writeln!(self.out, "\t {}", style("no rankable components").dim())?;
            return Ok(());
        }

        for (index, diff) in list.entries.iter().enumerate() {
            self.write_entry(index + 1, list.criterion, diff)?;
        }
        Ok(())
    }

    fn write_entry(
        &mut self,
        rank: usize,
        criterion: &Criterion,
        diff: &ComponentDiff,
    ) -> io::Result<()> {
        writeln!(
            self.out,
            "{}: \"{}\" - \"{}\"",
            rank, diff.component_name, diff.component_key
        )?;

        if let Some(entry) = diff.measure(criterion.metric) {
            self.write_measure(criterion, entry)?;
        }

        if let Some(link) = dashboard_link(self.dashboard_url.as_deref(), &diff.component_key) {
            writeln!(self.out, "\t {}", style(link).cyan())?;
        }
        Ok(())
    }

    fn write_measure(&mut self, criterion: &Criterion, entry: &DiffEntry) -> io::Result<()> {
        let newest_day = entry.new_entry.day();
        if criterion.ranks_change() {
            writeln!(
                self.out,
                "\t {} changed relative to {}",
                format_change(entry.delta_relative, "%"),
                newest_day
            )?;
            writeln!(
                self.out,
                "\t {} changed absolute to {}",
                format_change(entry.delta_absolute, criterion.unit),
                newest_day
            )?;
        }
        writeln!(
            self.out,
            "\t {} - @{}",
            format_measure(entry.new_value(), criterion.unit),
            newest_day
        )?;
        writeln!(
            self.out,
            "\t {} - @{}",
            format_measure(entry.old_value(), criterion.unit),
            entry.old_entry.day()
        )
    }

    fn write_failures(&mut self) -> io::Result<()> {
        if self.failures.is_empty() {
            return Ok(());
        }
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{} {} component(s) could not be loaded:",
            fmt::WARNING,
            self.failures.len()
        )?;
        for failure in &self.failures {
            writeln!(self.out, "\t {} {}", fmt::CROSSMARK, failure)?;
        }
        Ok(())
    }
}

impl<W: Write> RankingSink for ConsoleSink<W> {
    fn report_failure(&mut self, error: &SonarRankError) {
        self.failures.push(error.detailed());
    }

    fn render(&mut self, progress: &Progress, rankings: &[RankedList<'_>]) -> io::Result<()> {
        self.write_header(progress)?;
        for list in rankings {
            self.write_ranking(list)?;
        }
        self.write_failures()?;
        self.out.flush()
    }
}
