//! Rank command implementation
//!
//! Handles the `sonar-rank rank` command which loads an export directory,
//! derives a record per component and prints every ranking pass.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::env;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{ConfigFile, ConfigLoader};
use crate::error::SonarRankError;
use crate::fmt;
use crate::ranking::Ranker;
use crate::report::{ConsoleSink, JsonSink, RankingSink};
use crate::session::{RankingSession, SessionOptions, SessionSummary, UpdateOutcome};
use crate::source::SnapshotDirectory;

const PROGRESS_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} components";

/// Command-line settings of a ranking run
#[derive(Debug, Clone, Default)]
pub struct RankArgs {
    /// Export directory holding `components.json` and `history/`
    pub export_dir: PathBuf,
    /// Explicit configuration file
    pub config: Option<PathBuf>,
    /// Overrides `top-count`
    pub top: Option<usize>,
    /// Overrides `window-days`
    pub window_days: Option<u32>,
    /// Overrides `criteria`
    pub criteria: Option<Vec<String>>,
    /// Emit one JSON document instead of text
    pub json: bool,
    /// Re-render after every loaded component
    pub progressive: bool,
}

impl RankArgs {
    /// Overlay command-line values on a loaded configuration
    pub fn apply(&self, config: &mut ConfigFile) {
        if let Some(top) = self.top {
            config.top_count = top;
        }
        if let Some(days) = self.window_days {
            config.window_days = days;
        }
        if let Some(criteria) = &self.criteria {
            config.criteria = Some(criteria.clone());
        }
    }
}

/// Rank every component of an export directory
///
/// # Examples
///
/// ```no_run
/// use sonar_rank::cmd::rank::{cmd_rank, RankArgs};
///
/// cmd_rank(&RankArgs {
///     export_dir: "sonar-export".into(),
///     top: Some(10),
///     ..RankArgs::default()
/// })?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The configuration cannot be loaded or is invalid
/// - The export directory or its component listing is missing
/// - Output cannot be written
pub fn cmd_rank(args: &RankArgs) -> Result<()> {
    let project_root = env::current_dir().context("Failed to determine current directory")?;
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from(path)?,
        None => ConfigLoader::load(&project_root)?,
    };
    args.apply(&mut config);
    config.validate()?;

    let today = Local::now().date_naive();
    let window_start = config.window_start(today)?;

    if args.json {
        let mut sink = JsonSink::new(io::stdout().lock(), window_start);
        run_rank(&config, &args.export_dir, today, &mut sink, false)?;
    } else {
        println!(
            "{} {} Loading components with changes since {}",
            fmt::ROCKET,
            style("sonar-rank").bold(),
            style(window_start).cyan()
        );
        let summary = {
            let mut sink = ConsoleSink::new(
                io::stdout().lock(),
                window_start,
                config.dashboard_url.clone(),
            );
            run_rank(&config, &args.export_dir, today, &mut sink, args.progressive)?
        };
        print_summary(&summary);
    }

    Ok(())
}

/// Load, derive and rank, handing the rankings to `sink`
///
/// With `progressive` set the terminal is cleared and every pass re-rendered
/// after each completion; otherwise a progress bar is shown and the passes
/// are rendered once at the end.
pub fn run_rank<S: RankingSink>(
    config: &ConfigFile,
    export_dir: &Path,
    today: NaiveDate,
    sink: &mut S,
    progressive: bool,
) -> Result<SessionSummary> {
    if !export_dir.is_dir() {
        return Err(SonarRankError::FileNotFound {
            path: export_dir.to_path_buf(),
            operation: "sonar-rank rank".to_string(),
        }
        .into());
    }

    let window_start = config.window_start(today)?;
    let ranker = Ranker::new(
        config.top_count,
        config.required_metric.clone(),
        config.resolve_criteria()?,
    );

    let source = SnapshotDirectory::new(export_dir, config.qualifiers.clone());
    let mut options = SessionOptions::new(window_start, config.metrics.clone());
    options.threads = config.threads;
    options.shuffle = config.shuffle;
    let session = RankingSession::new(&source, &source, options);

    let progress_bar = if progressive {
        ProgressBar::hidden()
    } else {
        progress_bar()
    };
    let term = Term::stdout();
    let mut render_error: Option<io::Error> = None;

    let summary = session.run(|update| {
        if let UpdateOutcome::Failed(error) = update.outcome {
            sink.report_failure(error);
        }
        progress_bar.set_length(update.progress.total as u64);
        progress_bar.set_position(update.progress.finished() as u64);

        if progressive && render_error.is_none() {
            let rankings = ranker.rank_all(update.diffs);
            let rendered = term
                .clear_screen()
                .and_then(|_| sink.render(&update.progress, &rankings));
            if let Err(e) = rendered {
                render_error = Some(e);
            }
        }
    })?;
    progress_bar.finish_and_clear();

    if let Some(e) = render_error {
        return Err(write_error(e).into());
    }

    // Progressive output already shows the final state unless nothing arrived
    if !progressive || summary.progress.total == 0 {
        sink.render(&summary.progress, &ranker.rank_all(&summary.diffs))
            .map_err(write_error)?;
    }
    sink.finish().map_err(write_error)?;

    info!(
        "Ranked {} components over {} criteria",
        summary.progress.ingested,
        ranker.criteria().len()
    );
    Ok(summary)
}

fn write_error(source: io::Error) -> SonarRankError {
    SonarRankError::Io {
        context: "rankings output".to_string(),
        source,
    }
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template(PROGRESS_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░  ");
    bar.set_style(style);
    bar
}

fn print_summary(summary: &SessionSummary) {
    println!();
    if summary.failures.is_empty() {
        println!(
            "{} Ranked {} components",
            fmt::CHECKMARK,
            summary.progress.ingested
        );
    } else {
        println!(
            "{} Ranked {} of {} components ({} could not be loaded)",
            fmt::WARNING,
            summary.progress.ingested,
            summary.progress.total,
            style(summary.failures.len()).yellow()
        );
    }
}
