//! Tests for the centralized configuration constants.

use super::*;

/// Ensures default constants are sane and positive.
#[test]
fn default_constants_are_valid() {
    let cfg = GlobalConfig::default();
    assert!(cfg.tolerance > 0.0);
    assert_eq!(cfg.tolerance, HULL_EPSILON);
    assert!(cfg.max_iterations >= 1);
}

/// Validates the builder rejects invalid values.
#[test]
fn new_validates_inputs() {
    assert_eq!(
        GlobalConfig::new(0.0, 24).unwrap_err(),
        ConfigError::InvalidTolerance(0.0)
    );
    assert_eq!(
        GlobalConfig::new(1.0e-9, 0).unwrap_err(),
        ConfigError::InvalidIterations(0)
    );
    assert!(GlobalConfig::new(f64::NAN, 10).is_err());
    assert!(GlobalConfig::new(f64::INFINITY, 10).is_err());
}

#[test]
fn threshold_bounds_are_inclusive() {
    assert_eq!(validate_threshold(0.0), Ok(0.0));
    assert_eq!(validate_threshold(1.0), Ok(1.0));
    assert_eq!(
        validate_threshold(-0.1),
        Err(ConfigError::InvalidThreshold(-0.1))
    );
}
