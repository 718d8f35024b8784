//! Shared formatting utilities for measurement values and console output

use console::Emoji;

/// Rocket emoji for launch/start operations
pub const ROCKET: Emoji = Emoji("🚀", ">");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Sparkles emoji for completion/success
pub const SPARKLES: Emoji = Emoji("✨", "*");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️", "i");

/// Chart emoji for rankings
pub const CHART: Emoji = Emoji("📊", "~");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Placeholder for an absent value
pub const NOT_AVAILABLE: &str = "n/a";

/// Format a measurement value, rounded to two decimals
///
/// Whole numbers are printed without a fractional part.
///
/// # Examples
///
/// ```
/// use sonar_rank::fmt::format_value;
///
/// assert_eq!(format_value(80.0), "80");
/// assert_eq!(format_value(85.25), "85.25");
/// assert_eq!(format_value(3.333333), "3.33");
/// ```
pub fn format_value(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    // Avoid "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// Format an optional value with a unit suffix
///
/// ```
/// use sonar_rank::fmt::format_measure;
///
/// assert_eq!(format_measure(Some(42.5), "%"), "42.5%");
/// assert_eq!(format_measure(None, "%"), "n/a");
/// ```
pub fn format_measure(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{}{}", format_value(v), unit),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Format a change with explicit sign and one decimal
///
/// ```
/// use sonar_rank::fmt::format_change;
///
/// assert_eq!(format_change(Some(6.64), "%"), "+6.6%");
/// assert_eq!(format_change(Some(-120.0), " min"), "-120.0 min");
/// assert_eq!(format_change(None, "%"), "n/a");
/// ```
pub fn format_change(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:+.1}{}", v, unit),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Dashboard link of a component, if a prefix is configured
pub fn dashboard_link(prefix: Option<&str>, component_key: &str) -> Option<String> {
    prefix
        .filter(|p| !p.is_empty())
        .map(|p| format!("{}{}", p, component_key))
}
