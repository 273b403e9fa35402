//! Centralized configuration values shared across the convex hull workspace.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Distance a point must exceed to count as outside a hull face.
///
/// Relative to the input: the hull builder multiplies it by the largest
/// axis span of the cloud. Initial classification and post-cone
/// reassignment both compare against this single value; points within it
/// of a face plane are treated as interior.
///
/// # Examples
/// ```
/// use config::constants::HULL_EPSILON;
/// let coplanar_distance = 0.0;
/// assert!(!(coplanar_distance > HULL_EPSILON));
/// ```
pub const HULL_EPSILON: f64 = 1.0e-4;

/// Minimum cross-product magnitude of a seed triangle.
///
/// Below this the seed normal is ill-defined and the seed is rejected as
/// degenerate instead of producing NaN normals.
///
/// # Examples
/// ```
/// use config::constants::DEGENERATE_AREA_EPSILON;
/// assert!(DEGENERATE_AREA_EPSILON < 1.0e-6);
/// ```
pub const DEGENERATE_AREA_EPSILON: f64 = 1.0e-12;

/// Distance under which two sampled source vertices are merged.
///
/// # Examples
/// ```
/// use config::constants::DEDUP_TOLERANCE;
/// let a = [0.0_f64, 0.0, 0.0];
/// let b = [5.0e-6_f64, 0.0, 0.0];
/// assert!((b[0] - a[0]).abs() <= DEDUP_TOLERANCE);
/// ```
pub const DEDUP_TOLERANCE: f64 = 1.0e-5;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Minimum number of points a hull computation accepts.
///
/// # Examples
/// ```
/// use config::constants::MIN_HULL_POINTS;
/// let points = 3;
/// assert!(points < MIN_HULL_POINTS);
/// ```
pub const MIN_HULL_POINTS: usize = 4;

/// Maximum number of vertices in an exported hull mesh.
///
/// Triangle indices are exported as `u32`, and the flat export uses three
/// vertices per face.
///
/// # Examples
/// ```
/// use config::constants::MAX_VERTICES;
/// assert!(MAX_VERTICES <= u32::MAX as usize);
/// ```
pub const MAX_VERTICES: usize = 30_000_000;

/// Maximum number of k-means refinement passes.
///
/// # Examples
/// ```
/// use config::constants::KMEANS_MAX_ITERATIONS;
/// assert_eq!(KMEANS_MAX_ITERATIONS, 100);
/// ```
pub const KMEANS_MAX_ITERATIONS: usize = 100;

/// Default reassignment fraction under which k-means is considered converged.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_KMEANS_THRESHOLD;
/// let reassigned_fraction = 0.0;
/// assert!(reassigned_fraction <= DEFAULT_KMEANS_THRESHOLD);
/// ```
pub const DEFAULT_KMEANS_THRESHOLD: f64 = 0.01;

/// Rejection-sampling attempts allowed per requested interior point.
///
/// # Examples
/// ```
/// use config::constants::MAX_SAMPLE_ATTEMPTS_PER_POINT;
/// let wanted = 100;
/// let budget = wanted * MAX_SAMPLE_ATTEMPTS_PER_POINT;
/// assert!(budget >= wanted);
/// ```
pub const MAX_SAMPLE_ATTEMPTS_PER_POINT: usize = 64;

// =============================================================================
// GLOBAL CONFIG
// =============================================================================

/// Immutable snapshot of global configuration settings that can be shared
/// between crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Outside-of-face tolerance propagated into the hull builder.
    pub tolerance: f64,
    /// Iteration cap for iterative consumers such as k-means.
    pub max_iterations: usize,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// tolerance and iteration cap.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-6, 24).expect("valid config");
    /// assert_eq!(cfg.max_iterations, 24);
    /// ```
    pub fn new(tolerance: f64, max_iterations: usize) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if max_iterations == 0 {
            return Err(ConfigError::InvalidIterations(max_iterations));
        }
        Ok(Self {
            tolerance,
            max_iterations,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            tolerance: HULL_EPSILON,
            max_iterations: KMEANS_MAX_ITERATIONS,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or not finite.
    InvalidTolerance(f64),
    /// Raised when the iteration cap is zero.
    InvalidIterations(usize),
    /// Raised when a convergence threshold falls outside `[0, 1]`.
    InvalidThreshold(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive and finite: {value}")
            }
            ConfigError::InvalidIterations(value) => {
                write!(f, "max_iterations must be >= 1: {value}")
            }
            ConfigError::InvalidThreshold(value) => {
                write!(f, "threshold must lie in [0, 1]: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Validates a k-means convergence threshold.
///
/// # Examples
/// ```
/// use config::constants::validate_threshold;
/// assert!(validate_threshold(0.05).is_ok());
/// assert!(validate_threshold(1.5).is_err());
/// ```
pub fn validate_threshold(threshold: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(ConfigError::InvalidThreshold(threshold))
    }
}

#[cfg(test)]
mod tests;
