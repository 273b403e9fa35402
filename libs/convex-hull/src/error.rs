//! # Hull Errors
//!
//! Error types for convex hull construction.
//!
//! ## Error Policy
//!
//! - No operation is retried: the builder is deterministic for a given input
//!   order and tolerance
//! - Precondition failures (`InsufficientPoints`, `DegenerateSeed`) are the
//!   caller's to fix
//! - `TopologyInvariantViolated` signals an internal bug and is never
//!   recoverable

use config::constants::ConfigError;
use thiserror::Error;

/// Errors that can occur while building a convex hull.
#[derive(Debug, Error)]
pub enum HullError {
    /// Fewer than four input points.
    #[error("Convex hull requires at least 4 points, got {count}")]
    InsufficientPoints { count: usize },

    /// The seed quadruple is coplanar or collinear.
    #[error("Degenerate seed: {message}")]
    DegenerateSeed { message: String },

    /// A face adjacency or open-set invariant failed.
    #[error("Topology invariant violated: {message}")]
    TopologyInvariantViolated { message: String },

    /// The flat export would overflow the index type.
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },

    /// The hull configuration was rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl HullError {
    /// Creates a degenerate seed error.
    pub fn degenerate_seed(message: impl Into<String>) -> Self {
        Self::DegenerateSeed {
            message: message.into(),
        }
    }

    /// Creates a topology invariant error.
    pub fn topology(message: impl Into<String>) -> Self {
        Self::TopologyInvariantViolated {
            message: message.into(),
        }
    }
}

/// Result type alias for hull operations.
pub type HullResult<T> = Result<T, HullError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HullError::InsufficientPoints { count: 3 };
        assert!(err.to_string().contains("at least 4"));
        assert!(err.to_string().contains('3'));

        let err = HullError::degenerate_seed("first four points are coplanar");
        assert!(err.to_string().contains("coplanar"));

        let err = HullError::topology("face 7 references itself");
        assert!(err.to_string().contains("face 7"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: HullError = ConfigError::InvalidTolerance(-1.0).into();
        assert!(matches!(err, HullError::InvalidConfig(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HullError>();
    }
}
