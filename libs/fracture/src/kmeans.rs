//! # K-Means Clustering
//!
//! Lloyd iterations seeded with the first `k` points.
//!
//! ## Algorithm Steps
//!
//! 1. Centroids start at `points[0..k]`
//! 2. Assign every point to its nearest centroid (in parallel)
//! 3. Move each centroid to the mean of its points; an empty cluster keeps
//!    its previous centroid
//! 4. Stop when the fraction of points that changed cluster is at most the
//!    threshold, or after the iteration limit

use config::constants::{validate_threshold, GlobalConfig, DEFAULT_KMEANS_THRESHOLD, KMEANS_MAX_ITERATIONS};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{FractureError, FractureResult};
use crate::partition::assign_to_seeds;

/// Result of a k-means run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clustering {
    pub centroids: Vec<DVec3>,
    /// Cluster index of every input point.
    pub assignments: Vec<usize>,
    /// Assignment passes performed.
    pub iterations: usize,
}

impl Clustering {
    /// Points per cluster.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &a in &self.assignments {
            sizes[a] += 1;
        }
        sizes
    }
}

/// K-means partitioner.
///
/// # Example
///
/// ```rust
/// use fracture::KMeans;
/// use glam::DVec3;
///
/// let points = vec![
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(10.0, 0.0, 0.0),
///     DVec3::new(0.1, 0.0, 0.0),
///     DVec3::new(10.1, 0.0, 0.0),
/// ];
/// let clustering = KMeans::new(2).cluster(&points).unwrap();
/// assert_eq!(clustering.assignments, vec![0, 1, 0, 1]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeans {
    clusters: usize,
    threshold: f64,
    max_iterations: usize,
}

impl KMeans {
    /// Creates a partitioner for `clusters` clusters with default limits.
    pub fn new(clusters: usize) -> Self {
        Self {
            clusters,
            threshold: DEFAULT_KMEANS_THRESHOLD,
            max_iterations: KMEANS_MAX_ITERATIONS,
        }
    }

    /// Sets the reassigned-fraction threshold, which must lie in `[0, 1]`.
    pub fn with_threshold(mut self, threshold: f64) -> FractureResult<Self> {
        self.threshold = validate_threshold(threshold)?;
        Ok(self)
    }

    /// Takes the iteration limit from the workspace settings.
    pub fn with_global(mut self, global: &GlobalConfig) -> Self {
        self.max_iterations = global.max_iterations;
        self
    }

    pub fn clusters(&self) -> usize {
        self.clusters
    }

    /// Clusters `points`.
    ///
    /// # Errors
    ///
    /// - [`FractureError::NoClusters`] when `k` is zero
    /// - [`FractureError::NotEnoughPoints`] when there are fewer points than clusters
    pub fn cluster(&self, points: &[DVec3]) -> FractureResult<Clustering> {
        let k = self.clusters;
        if k == 0 {
            return Err(FractureError::NoClusters);
        }
        if points.len() < k {
            return Err(FractureError::NotEnoughPoints {
                points: points.len(),
                clusters: k,
            });
        }

        let mut centroids = points[..k].to_vec();
        // no point starts in a valid cluster
        let mut assignments = vec![k; points.len()];
        let mut sums = vec![DVec3::ZERO; k];
        let mut counts = vec![0usize; k];
        let mut iterations = 0;

        while iterations < self.max_iterations.max(1) {
            iterations += 1;
            let nearest = assign_to_seeds(points, &centroids);

            sums.fill(DVec3::ZERO);
            counts.fill(0);
            let mut reassigned = 0;
            for ((point, &cluster), previous) in points.iter().zip(&nearest).zip(assignments.iter_mut()) {
                if *previous != cluster {
                    reassigned += 1;
                    *previous = cluster;
                }
                sums[cluster] += *point;
                counts[cluster] += 1;
            }

            for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums).zip(&counts) {
                if count > 0 {
                    *centroid = *sum / count as f64;
                }
            }

            let fraction = reassigned as f64 / points.len() as f64;
            log::trace!("k-means pass {}: {:.4} of points reassigned", iterations, fraction);
            if fraction <= self.threshold {
                break;
            }
        }

        log::debug!("k-means with {} clusters converged after {} passes", k, iterations);
        Ok(Clustering {
            centroids,
            assignments,
            iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_blobs() -> Vec<DVec3> {
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(10.0, 1.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(11.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_two_blobs() {
        let clustering = KMeans::new(2).cluster(&two_blobs()).unwrap();
        assert_eq!(clustering.assignments, vec![0, 1, 0, 1, 0, 1]);
        assert_relative_eq!(clustering.centroids[0].x, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(clustering.centroids[1].x, 31.0 / 3.0, epsilon = 1e-12);
        assert_eq!(clustering.cluster_sizes(), vec![3, 3]);
        // first pass assigns everything, second pass changes nothing
        assert_eq!(clustering.iterations, 2);
    }

    #[test]
    fn test_first_points_seed_centroids() {
        let points = vec![DVec3::X, DVec3::Y, DVec3::Z];
        let clustering = KMeans::new(3).cluster(&points).unwrap();
        assert_eq!(clustering.centroids, points);
        assert_eq!(clustering.assignments, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_cluster_keeps_centroid() {
        let points = vec![DVec3::ZERO, DVec3::ZERO, DVec3::ONE];
        let clustering = KMeans::new(2).cluster(&points).unwrap();
        // both seeds coincide, so the first one takes every zero point
        assert_eq!(clustering.assignments, vec![0, 0, 0]);
        assert_eq!(clustering.centroids[1], DVec3::ZERO);
    }

    #[test]
    fn test_not_enough_points() {
        let err = KMeans::new(4).cluster(&[DVec3::ZERO; 3]).unwrap_err();
        assert!(matches!(
            err,
            FractureError::NotEnoughPoints {
                points: 3,
                clusters: 4
            }
        ));
        assert!(matches!(
            KMeans::new(0).cluster(&[DVec3::ZERO]),
            Err(FractureError::NoClusters)
        ));
    }

    #[test]
    fn test_threshold_validation() {
        assert!(KMeans::new(2).with_threshold(0.5).is_ok());
        assert!(matches!(
            KMeans::new(2).with_threshold(1.5),
            Err(FractureError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_iteration_limit() {
        let global = GlobalConfig::new(1e-4, 1).unwrap();
        let clustering = KMeans::new(2)
            .with_global(&global)
            .cluster(&two_blobs())
            .unwrap();
        assert_eq!(clustering.iterations, 1);
    }
}
