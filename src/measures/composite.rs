//! Composite indicators derived from several base measurements
//!
//! A composite is all-or-nothing: it is added to a record only when every
//! required base measurement is present with both endpoint values, and the
//! code volume is non-zero at both endpoints.

use super::diff::ComponentDiff;
use super::point::{finite, DiffEntry, MeasurementPoint};
use super::{NCLOC, SECURITY_HOTSPOTS, SQALE_INDEX};
use log::debug;
use serde::{Deserialize, Serialize};

/// Key of the remediation-cost-per-code-volume indicator
pub const REMEDIATION_HOURS_PER_KLOC: &str = "remediation_hours_per_kloc";

/// Estimated remediation minutes per open security hotspot
pub const MINUTES_PER_SECURITY_HOTSPOT: f64 = 30.0;

/// Minutes to hours
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// A base measurement contributing to a composite's cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostContributor {
    /// Base measurement name
    pub metric: String,
    /// Multiplier applied to the value (time per unit for count-like measurements)
    pub weight: f64,
}

impl CostContributor {
    /// Contributor whose value is already a cost
    pub fn cost(metric: impl Into<String>) -> Self {
        Self::weighted(metric, 1.0)
    }

    /// Count-like contributor scaled by a fixed per-unit weight
    pub fn weighted(metric: impl Into<String>, weight: f64) -> Self {
        Self {
            metric: metric.into(),
            weight,
        }
    }
}

/// `sum(contributor * weight) / volume * volume_scale / unit_divisor`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeIndicator {
    /// Key the indicator is stored under
    pub key: String,
    /// Cost terms
    pub contributors: Vec<CostContributor>,
    /// Code volume measurement used as denominator
    pub volume_metric: String,
    /// Volume normalization (1000 for "per thousand lines")
    pub volume_scale: f64,
    /// Unit conversion applied to the result
    pub unit_divisor: f64,
}

impl CompositeIndicator {
    /// Remediation hours (debt plus hotspot review time) per 1000 lines of code
    pub fn remediation_hours_per_kloc() -> Self {
        Self {
            key: REMEDIATION_HOURS_PER_KLOC.to_string(),
            contributors: vec![
                CostContributor::cost(SQALE_INDEX),
                CostContributor::weighted(SECURITY_HOTSPOTS, MINUTES_PER_SECURITY_HOTSPOT),
            ],
            volume_metric: NCLOC.to_string(),
            volume_scale: 1000.0,
            unit_divisor: MINUTES_PER_HOUR,
        }
    }

    /// Indicators derived for every component by default
    pub fn defaults() -> Vec<Self> {
        vec![Self::remediation_hours_per_kloc()]
    }

    /// Base measurements this indicator needs
    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.contributors
            .iter()
            .map(|c| c.metric.as_str())
            .chain(std::iter::once(self.volume_metric.as_str()))
    }

    /// Compute the indicator for a record, `None` if any input is missing or degenerate
    pub fn compute(&self, diff: &ComponentDiff) -> Option<DiffEntry> {
        let mut samples = 0;
        for key in self.required_keys() {
            let entry = diff.measure(key)?;
            if !entry.has_both_values() {
                return None;
            }
            samples = samples.max(entry.samples);
        }

        let volume = diff.measure(&self.volume_metric)?;
        let old_value = self.value_at(diff, |e| &e.old_entry)?;
        let new_value = self.value_at(diff, |e| &e.new_entry)?;
        let old_point = MeasurementPoint::new(volume.old_entry.date.clone(), Some(old_value));
        let new_point = MeasurementPoint::new(volume.new_entry.date.clone(), Some(new_value));

        if samples <= 1 {
            Some(DiffEntry::single(new_point))
        } else {
            Some(DiffEntry::new(old_point, new_point).with_samples(samples))
        }
    }

    /// Compute and store the indicator; returns whether it was added
    pub fn derive(&self, diff: &mut ComponentDiff) -> bool {
        match self.compute(diff) {
            Some(entry) => {
                diff.insert(self.key.clone(), entry);
                true
            }
            None => {
                debug!(
                    "{}: '{}' not computable from available measures",
                    diff.component_key, self.key
                );
                false
            }
        }
    }

    fn value_at(
        &self,
        diff: &ComponentDiff,
        endpoint: fn(&DiffEntry) -> &MeasurementPoint,
    ) -> Option<f64> {
        let volume = endpoint(diff.measure(&self.volume_metric)?).value?;
        if volume == 0.0 {
            return None;
        }

        let mut cost = 0.0;
        for contributor in &self.contributors {
            cost += endpoint(diff.measure(&contributor.metric)?).value? * contributor.weight;
        }

        finite(cost / volume * self.volume_scale / self.unit_divisor)
    }
}

/// Derive every indicator in order, so later ones may build on earlier ones
pub fn derive_composites(diff: &mut ComponentDiff, indicators: &[CompositeIndicator]) {
    for indicator in indicators {
        indicator.derive(diff);
    }
}
