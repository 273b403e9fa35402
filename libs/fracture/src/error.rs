//! # Fracture Errors

use config::constants::ConfigError;
use convex_hull::HullError;
use thiserror::Error;

/// Errors from partitioning, sampling and shard construction.
#[derive(Debug, Error)]
pub enum FractureError {
    /// A hull computation failed.
    #[error("Hull error: {0}")]
    Hull(#[from] HullError),

    /// Fewer points than requested clusters.
    #[error("Not enough points: {points} points for {clusters} clusters")]
    NotEnoughPoints { points: usize, clusters: usize },

    /// Zero clusters or seeds were requested.
    #[error("At least one cluster is required")]
    NoClusters,

    /// Rejection sampling ran out of attempts.
    #[error("Sampling exhausted: found {found} of {wanted} interior points")]
    SamplingExhausted { wanted: usize, found: usize },

    /// A triangle references a vertex that does not exist.
    #[error("Triangle index {index} out of bounds for {len} vertices")]
    IndexOutOfBounds { index: u32, len: usize },

    /// The background computation ended without a result.
    #[error("Hull job ended without producing a result")]
    JobLost,

    /// A parameter was rejected.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Result type alias for fracture operations.
pub type FractureResult<T> = Result<T, FractureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hull_error_converts() {
        let err: FractureError = HullError::InsufficientPoints { count: 2 }.into();
        assert!(matches!(err, FractureError::Hull(_)));
        assert!(err.to_string().contains("at least 4"));
    }

    #[test]
    fn test_error_display() {
        let err = FractureError::NotEnoughPoints {
            points: 3,
            clusters: 5,
        };
        assert_eq!(err.to_string(), "Not enough points: 3 points for 5 clusters");

        let err = FractureError::SamplingExhausted { wanted: 10, found: 4 };
        assert!(err.to_string().contains("4 of 10"));
    }
}
