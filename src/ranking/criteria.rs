//! Built-in ranking criteria

use super::engine::top_n;
use super::RankedList;
use crate::measures::composite::REMEDIATION_HOURS_PER_KLOC;
use crate::measures::{ComponentDiff, DiffEntry, COVERAGE, SQALE_INDEX};
use serde::Serialize;

/// Which value of a measurement a criterion ranks by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankKey {
    /// Newest value
    NewValue,
    /// Absolute change over the window (unchanged components excluded)
    DeltaAbsolute,
    /// Relative change over the window (unchanged components excluded)
    DeltaRelative,
}

/// Whether smaller or larger values rank first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Order {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

/// A named ranking pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Criterion {
    /// Identifier used on the command line and in config
    pub name: &'static str,
    /// Heading shown after "Top N"
    pub heading: &'static str,
    /// Measurement the criterion reads
    pub metric: &'static str,
    /// Value of the measurement used as key
    pub key: RankKey,
    /// Ranking direction
    pub order: Order,
    /// Display unit of the measurement's values
    pub unit: &'static str,
}

/// All built-in criteria in display order
pub static BUILTIN_CRITERIA: [Criterion; 6] = [
    Criterion {
        name: "coverage",
        heading: "Coverage",
        metric: COVERAGE,
        key: RankKey::NewValue,
        order: Order::Descending,
        unit: "%",
    },
    Criterion {
        name: "coverage-improvement",
        heading: "Coverage Improvement",
        metric: COVERAGE,
        key: RankKey::DeltaRelative,
        order: Order::Descending,
        unit: "%",
    },
    Criterion {
        name: "debt",
        heading: "Technical Debt (SQALE index)",
        metric: SQALE_INDEX,
        key: RankKey::NewValue,
        order: Order::Ascending,
        unit: " min",
    },
    Criterion {
        name: "debt-improvement",
        heading: "Technical Debt Improvement",
        metric: SQALE_INDEX,
        key: RankKey::DeltaRelative,
        order: Order::Ascending,
        unit: " min",
    },
    Criterion {
        name: "debt-density",
        heading: "Remediation Hours per 1000 Lines",
        metric: REMEDIATION_HOURS_PER_KLOC,
        key: RankKey::NewValue,
        order: Order::Ascending,
        unit: " h",
    },
    Criterion {
        name: "debt-density-improvement",
        heading: "Remediation Density Improvement",
        metric: REMEDIATION_HOURS_PER_KLOC,
        key: RankKey::DeltaAbsolute,
        order: Order::Ascending,
        unit: " h",
    },
];

impl Criterion {
    /// Look up a built-in criterion by name
    ///
    /// ```
    /// use sonar_rank::ranking::Criterion;
    ///
    /// assert!(Criterion::find("coverage").is_some());
    /// assert!(Criterion::find("bogus").is_none());
    /// ```
    pub fn find(name: &str) -> Option<&'static Criterion> {
        BUILTIN_CRITERIA.iter().find(|c| c.name == name)
    }

    /// Every built-in criterion
    pub fn all() -> impl Iterator<Item = &'static Criterion> {
        BUILTIN_CRITERIA.iter()
    }

    /// Names of every built-in criterion
    pub fn names() -> Vec<String> {
        Self::all().map(|c| c.name.to_string()).collect()
    }

    /// Title of a pass capped at `top_count`
    pub fn title(&self, top_count: usize) -> String {
        format!("Top {} {}", top_count, self.heading)
    }

    /// True for criteria ranking changes rather than levels
    pub fn ranks_change(&self) -> bool {
        self.key != RankKey::NewValue
    }

    /// Ranking key of a record; ascending order over this value is the ranking
    pub fn select(&self, diff: &ComponentDiff) -> Option<f64> {
        let entry = diff.measure(self.metric)?;
        let value = match self.key {
            RankKey::NewValue => entry.new_value(),
            RankKey::DeltaAbsolute => changed(entry)?.delta_absolute,
            RankKey::DeltaRelative => changed(entry)?.delta_relative,
        }?;
        Some(match self.order {
            Order::Ascending => value,
            Order::Descending => -value,
        })
    }

    /// Run this criterion over a collection
    pub fn rank<'a, I>(&'static self, diffs: I, top_count: usize, required_key: &str) -> RankedList<'a>
    where
        I: IntoIterator<Item = &'a ComponentDiff>,
    {
        RankedList {
            criterion: self,
            title: self.title(top_count),
            entries: top_n(diffs, top_count, required_key, |d| self.select(d)),
        }
    }
}

fn changed(entry: &DiffEntry) -> Option<&DiffEntry> {
    entry.is_changed().then_some(entry)
}
