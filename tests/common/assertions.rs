//! Test assertion helpers
//!
//! Provides utilities for robust assertions on derived measurement values,
//! which are the result of floating-point division.

/// Assert that two floating-point values are approximately equal
///
/// # Arguments
/// * `actual` - The actual value
/// * `expected` - The expected value
/// * `epsilon` - Maximum allowed difference
#[allow(dead_code)]
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff < epsilon,
        "Float values not approximately equal:\n  actual: {}\n  expected: {}\n  diff: {} (epsilon: {})",
        actual, expected, diff, epsilon
    );
}

/// Assert that an optional value is present and approximately `expected`
#[allow(dead_code)]
pub fn assert_some_approx(actual: Option<f64>, expected: f64, epsilon: f64) {
    match actual {
        Some(value) => assert_approx_eq(value, expected, epsilon),
        None => panic!("Expected a value close to {}, got none", expected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq_pass() {
        assert_approx_eq(0.75, 0.75, 0.01);
        assert_approx_eq(12.5, 12.45, 0.1);
    }

    #[test]
    #[should_panic(expected = "Float values not approximately equal")]
    fn test_assert_approx_eq_fail() {
        assert_approx_eq(0.75, 0.80, 0.01);
    }

    #[test]
    #[should_panic(expected = "got none")]
    fn test_assert_some_approx_none_fails() {
        assert_some_approx(None, 1.0, 0.1);
    }
}
