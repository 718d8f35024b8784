//! Concurrent acquisition with incremental re-ranking
//!
//! One task per component runs on a bounded `rayon` pool: fetch the history,
//! ingest it, derive composites. Each task reports back over a channel to the
//! coordinating thread, which appends successful records to a
//! [`DiffCollection`] and hands the caller a snapshot after every single
//! completion, so rankings can be re-run while the remaining fetches are
//! still in flight.

use crate::error::SonarRankError;
use crate::measures::{derive_composites, ingest, Component, ComponentDiff, CompositeIndicator};
use crate::source::{ComponentDirectory, HistorySource};
use chrono::NaiveDate;
use log::{debug, info, warn};
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::sync::mpsc;
use std::sync::Arc;

/// Append-only collection of derived records, shareable across threads
#[derive(Debug, Clone, Default)]
pub struct DiffCollection {
    inner: Arc<RwLock<Vec<Arc<ComponentDiff>>>>,
}

impl DiffCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record
    pub fn push(&self, diff: Arc<ComponentDiff>) {
        self.inner.write().push(diff);
    }

    /// Point-in-time copy of the records, in arrival order
    pub fn snapshot(&self) -> Vec<Arc<ComponentDiff>> {
        self.inner.read().clone()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// True if no record has arrived yet
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

/// Counts of finished components
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Components ingested successfully
    pub ingested: usize,
    /// Components whose history could not be loaded
    pub failed: usize,
    /// Components dispatched
    pub total: usize,
}

impl Progress {
    /// Finished components, successful or not
    pub fn finished(&self) -> usize {
        self.ingested + self.failed
    }

    /// True once every dispatched component has finished
    pub fn is_complete(&self) -> bool {
        self.finished() >= self.total
    }
}

/// What a single completion produced
#[derive(Debug)]
pub enum UpdateOutcome<'a> {
    /// A record was added to the collection
    Ingested(&'a ComponentDiff),
    /// A component's pipeline failed and it was left out
    Failed(&'a SonarRankError),
}

/// State handed to the caller after each completion
#[derive(Debug)]
pub struct SessionUpdate<'a> {
    /// Progress including this completion
    pub progress: Progress,
    /// Snapshot of every record collected so far
    pub diffs: &'a [Arc<ComponentDiff>],
    /// The completion that triggered this update
    pub outcome: UpdateOutcome<'a>,
}

/// Outcome of a full session
#[derive(Debug)]
pub struct SessionSummary {
    /// Final progress
    pub progress: Progress,
    /// Every collected record, in arrival order
    pub diffs: Vec<Arc<ComponentDiff>>,
    /// Per-component failures, in arrival order
    pub failures: Vec<SonarRankError>,
}

/// Settings of a ranking session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// First day of the trailing window
    pub window_start: NaiveDate,
    /// Base measurements to request
    pub metrics: Vec<String>,
    /// Composite indicators derived for each component
    pub composites: Vec<CompositeIndicator>,
    /// Worker threads (`None` = rayon default)
    pub threads: Option<usize>,
    /// Randomize dispatch order
    pub shuffle: bool,
}

impl SessionOptions {
    /// Options with default composites, default thread count and shuffling
    pub fn new(window_start: NaiveDate, metrics: Vec<String>) -> Self {
        Self {
            window_start,
            metrics,
            composites: CompositeIndicator::defaults(),
            threads: None,
            shuffle: true,
        }
    }
}

/// Coordinates fetching, derivation and accumulation for one run
pub struct RankingSession<'s> {
    directory: &'s dyn ComponentDirectory,
    history: &'s dyn HistorySource,
    options: SessionOptions,
    collection: DiffCollection,
}

impl<'s> RankingSession<'s> {
    /// Create a session over the given collaborators
    pub fn new(
        directory: &'s dyn ComponentDirectory,
        history: &'s dyn HistorySource,
        options: SessionOptions,
    ) -> Self {
        Self {
            directory,
            history,
            options,
            collection: DiffCollection::new(),
        }
    }

    /// Handle to the collection the session appends to
    pub fn collection(&self) -> DiffCollection {
        self.collection.clone()
    }

    /// Fetch and derive every component, calling `on_update` after each completion
    ///
    /// Only a failure to list components aborts the run; per-component
    /// failures are reported through `on_update` and collected in the summary.
    pub fn run<F>(&self, mut on_update: F) -> Result<SessionSummary, SonarRankError>
    where
        F: FnMut(SessionUpdate<'_>),
    {
        let mut components = self
            .directory
            .list_components()
            .map_err(SonarRankError::DirectoryFetch)?;
        if self.options.shuffle {
            components.shuffle(&mut rand::rng());
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.threads.unwrap_or(0))
            .thread_name(|i| format!("sonar-rank-fetch-{}", i))
            .build()?;

        let mut progress = Progress {
            total: components.len(),
            ..Progress::default()
        };
        info!(
            "Loading {} components with {} workers since {}",
            progress.total,
            pool.current_num_threads(),
            self.options.window_start
        );

        let (tx, rx) = mpsc::channel::<Result<ComponentDiff, SonarRankError>>();
        let mut failures = Vec::new();

        std::thread::scope(|scope| {
            scope.spawn(move || {
                pool.scope_fifo(|fifo| {
                    for component in &components {
                        let tx = tx.clone();
                        fifo.spawn_fifo(move |_| {
                            // The receiver outlives every sender
                            let _ = tx.send(self.process(component));
                        });
                    }
                });
            });

            for outcome in rx {
                match outcome {
                    Ok(diff) => {
                        let diff = Arc::new(diff);
                        self.collection.push(Arc::clone(&diff));
                        progress.ingested += 1;
                        let snapshot = self.collection.snapshot();
                        on_update(SessionUpdate {
                            progress,
                            diffs: &snapshot,
                            outcome: UpdateOutcome::Ingested(&diff),
                        });
                    }
                    Err(error) => {
                        warn!("{}", error.detailed());
                        progress.failed += 1;
                        let snapshot = self.collection.snapshot();
                        on_update(SessionUpdate {
                            progress,
                            diffs: &snapshot,
                            outcome: UpdateOutcome::Failed(&error),
                        });
                        failures.push(error);
                    }
                }
            }
        });

        info!(
            "Loaded {} of {} components ({} failed)",
            progress.ingested, progress.total, progress.failed
        );

        Ok(SessionSummary {
            progress,
            diffs: self.collection.snapshot(),
            failures,
        })
    }

    /// Fetch, ingest and derive one component
    pub fn process(&self, component: &Component) -> Result<ComponentDiff, SonarRankError> {
        let response = self
            .history
            .fetch_history(component, &self.options.metrics, self.options.window_start)
            .map_err(|source| SonarRankError::HistoryFetch {
                component_key: component.key.clone(),
                component_name: component.name.clone(),
                source,
            })?;

        let mut diff = ingest(component, &response);
        derive_composites(&mut diff, &self.options.composites);
        debug!(
            "{}: {} measures derived",
            component.key,
            diff.measures.len()
        );
        Ok(diff)
    }
}
