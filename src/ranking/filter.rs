//! Completeness filter

use crate::measures::ComponentDiff;

/// True if the required measurement was analyzed (its newest value is a number)
///
/// A component failing this check takes part in no ranking pass of the run.
pub fn is_rankable(diff: &ComponentDiff, required_key: &str) -> bool {
    diff.new_value(required_key).is_some_and(f64::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measures::{Component, DiffEntry, MeasurementPoint};

    fn diff_with_coverage(new: Option<f64>) -> ComponentDiff {
        let mut diff = ComponentDiff::new(&Component::new("k", "n"));
        diff.insert(
            "coverage",
            DiffEntry::new(
                MeasurementPoint::new("2024-01-01", Some(1.0)),
                MeasurementPoint::new("2024-02-01", new),
            ),
        );
        diff
    }

    #[test]
    fn test_rankable_when_required_value_present() {
        assert!(is_rankable(&diff_with_coverage(Some(0.0)), "coverage"));
    }

    #[test]
    fn test_not_rankable_when_required_value_missing() {
        assert!(!is_rankable(&diff_with_coverage(None), "coverage"));
    }

    #[test]
    fn test_not_rankable_when_required_key_absent() {
        assert!(!is_rankable(&diff_with_coverage(Some(50.0)), "ncloc"));
    }
}
