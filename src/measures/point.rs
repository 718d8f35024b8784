//! Measurement endpoints and two-point deltas

use serde::{Deserialize, Serialize};

/// A single (timestamp, value) sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementPoint {
    /// Sample timestamp as reported by the server
    pub date: String,
    /// Sample value, `None` when missing or malformed
    pub value: Option<f64>,
}

impl MeasurementPoint {
    /// Create a point, discarding non-finite values
    pub fn new(date: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            date: date.into(),
            value: value.and_then(finite),
        }
    }

    /// Calendar day part of the timestamp (`YYYY-MM-DD`)
    ///
    /// ```
    /// use sonar_rank::measures::MeasurementPoint;
    ///
    /// let point = MeasurementPoint::new("2024-03-01T10:15:00+0100", Some(1.0));
    /// assert_eq!(point.day(), "2024-03-01");
    /// ```
    pub fn day(&self) -> &str {
        self.date.get(..10).unwrap_or(&self.date)
    }
}

/// Oldest and newest sample of one measurement plus their deltas
///
/// `delta_absolute` is only present when both endpoint values are present;
/// `delta_relative` additionally requires a non-zero old value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffEntry {
    /// Earliest sample in the trailing window
    pub old_entry: MeasurementPoint,
    /// Latest sample in the trailing window
    pub new_entry: MeasurementPoint,
    /// `new - old`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta_absolute: Option<f64>,
    /// Change in percent of the old value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta_relative: Option<f64>,
    /// Number of samples the endpoints were taken from
    pub samples: usize,
}

impl DiffEntry {
    /// Build an entry from two distinct samples
    ///
    /// # Examples
    ///
    /// ```
    /// use sonar_rank::measures::{DiffEntry, MeasurementPoint};
    ///
    /// let entry = DiffEntry::new(
    ///     MeasurementPoint::new("2024-01-01", Some(50.0)),
    ///     MeasurementPoint::new("2024-03-01", Some(60.0)),
    /// );
    /// assert_eq!(entry.delta_absolute, Some(10.0));
    /// assert_eq!(entry.delta_relative, Some(20.0));
    ///
    /// let from_zero = DiffEntry::new(
    ///     MeasurementPoint::new("2024-01-01", Some(0.0)),
    ///     MeasurementPoint::new("2024-03-01", Some(5.0)),
    /// );
    /// assert_eq!(from_zero.delta_absolute, Some(5.0));
    /// assert_eq!(from_zero.delta_relative, None);
    /// ```
    pub fn new(old_entry: MeasurementPoint, new_entry: MeasurementPoint) -> Self {
        let delta_absolute = absolute_delta(old_entry.value, new_entry.value);
        let delta_relative = relative_delta(delta_absolute, old_entry.value);
        Self {
            old_entry,
            new_entry,
            delta_absolute,
            delta_relative,
            samples: 2,
        }
    }

    /// Build an entry from a lone sample: both endpoints are that sample, no deltas
    pub fn single(point: MeasurementPoint) -> Self {
        Self {
            old_entry: point.clone(),
            new_entry: point,
            delta_absolute: None,
            delta_relative: None,
            samples: 1,
        }
    }

    /// Record how many samples the window held
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Old endpoint value
    pub fn old_value(&self) -> Option<f64> {
        self.old_entry.value
    }

    /// New endpoint value
    pub fn new_value(&self) -> Option<f64> {
        self.new_entry.value
    }

    /// True when both endpoint values are present
    pub fn has_both_values(&self) -> bool {
        self.old_value().is_some() && self.new_value().is_some()
    }

    /// True when the measurement moved within the window
    pub fn is_changed(&self) -> bool {
        matches!(self.delta_absolute, Some(delta) if delta != 0.0)
    }
}

/// `new - old`, only when both are present
pub fn absolute_delta(old: Option<f64>, new: Option<f64>) -> Option<f64> {
    finite(new? - old?)
}

/// `100 * delta / old`, only when the delta exists and `old` is non-zero
pub fn relative_delta(delta_absolute: Option<f64>, old: Option<f64>) -> Option<f64> {
    let delta = delta_absolute?;
    let old = old?;
    if old == 0.0 {
        return None;
    }
    finite(100.0 * delta / old)
}

pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
