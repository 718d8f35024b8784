//! Top-N ranking over derived records

use super::filter::is_rankable;
use crate::measures::ComponentDiff;
use log::debug;
use std::cmp::Ordering;

/// Rank records ascending by `key` and keep the first `n`
///
/// Records failing the completeness filter on `required_key` are skipped, as
/// are records the selector yields no value for. The sort is stable, so ties
/// keep their input order. Callers wanting "highest first" negate the key.
///
/// # Examples
///
/// ```
/// use sonar_rank::measures::{Component, ComponentDiff, DiffEntry, MeasurementPoint};
/// use sonar_rank::ranking::top_n;
///
/// let diff = |key: &str, old: f64, new: f64| {
///     let mut d = ComponentDiff::new(&Component::new(key, key));
///     d.insert("coverage", DiffEntry::new(
///         MeasurementPoint::new("2024-01-01", Some(old)),
///         MeasurementPoint::new("2024-03-01", Some(new)),
///     ));
///     d
/// };
/// let diffs = vec![diff("a", 10.0, 20.0), diff("b", 5.0, 5.0)];
///
/// let ranked = top_n(&diffs, 1, "coverage", |d| d.measure("coverage")?.delta_absolute);
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].component_key, "b");
/// ```
pub fn top_n<'a, I, F>(diffs: I, n: usize, required_key: &str, key: F) -> Vec<&'a ComponentDiff>
where
    I: IntoIterator<Item = &'a ComponentDiff>,
    F: Fn(&ComponentDiff) -> Option<f64>,
{
    let mut keyed: Vec<(f64, &'a ComponentDiff)> = diffs
        .into_iter()
        .filter(|diff| is_rankable(diff, required_key))
        .filter_map(|diff| match key(diff) {
            Some(value) if value.is_finite() => Some((value, diff)),
            _ => {
                debug!("{}: no ranking key, skipped", diff.component_key);
                None
            }
        })
        .collect();

    keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    keyed.truncate(n);
    keyed.into_iter().map(|(_, diff)| diff).collect()
}
