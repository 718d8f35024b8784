//! Completeness filtering and top-N rankings
//!
//! Every pass is read-only over the collection it is given, so any number of
//! passes may run over the same snapshot.

pub mod criteria;
pub mod engine;
pub mod filter;

pub use criteria::{Criterion, Order, RankKey, BUILTIN_CRITERIA};
pub use engine::top_n;
pub use filter::is_rankable;

use crate::measures::ComponentDiff;
use serde::Serialize;
use std::borrow::Borrow;

/// Result of one ranking pass
#[derive(Debug, Clone, Serialize)]
pub struct RankedList<'a> {
    /// Criterion that produced the list
    pub criterion: &'static Criterion,
    /// Human-readable title
    pub title: String,
    /// Ranked records, best first
    pub entries: Vec<&'a ComponentDiff>,
}

/// Runs a fixed set of criteria with a shared cap and completeness filter
#[derive(Debug, Clone)]
pub struct Ranker {
    top_count: usize,
    required_key: String,
    criteria: Vec<&'static Criterion>,
}

impl Ranker {
    /// Create a ranker
    pub fn new(
        top_count: usize,
        required_key: impl Into<String>,
        criteria: Vec<&'static Criterion>,
    ) -> Self {
        Self {
            top_count,
            required_key: required_key.into(),
            criteria,
        }
    }

    /// Criteria run by this ranker
    pub fn criteria(&self) -> &[&'static Criterion] {
        &self.criteria
    }

    /// Run every criterion over the collection
    pub fn rank_all<'a, D>(&self, diffs: &'a [D]) -> Vec<RankedList<'a>>
    where
        D: Borrow<ComponentDiff>,
    {
        self.criteria
            .iter()
            .map(|criterion| {
                criterion.rank(
                    diffs.iter().map(Borrow::borrow),
                    self.top_count,
                    &self.required_key,
                )
            })
            .collect()
    }
}
