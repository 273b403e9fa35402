//! # Shard Construction
//!
//! Partitions a cloud around seeds and hulls every partition in parallel.
//! Each rayon task borrows its own [`HullBuilder`] from a shared pool.

use convex_hull::{HullBuilder, HullConfig, HullError, HullMesh, ObjectPool, SeedStrategy};
use glam::DVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{FractureError, FractureResult};
use crate::kmeans::KMeans;
use crate::partition::{partition_points, PointCloud};

/// One convex piece of a fractured cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shard {
    /// Seed whose nearest points formed this shard.
    pub seed_index: usize,
    pub mesh: HullMesh,
    /// Enclosed volume of `mesh`.
    pub volume: f64,
}

impl Shard {
    /// Mass for a uniform `density`.
    pub fn mass(&self, density: f64) -> f64 {
        self.volume * density
    }

    /// Mass after uniformly scaling the shard by `scale`.
    pub fn scaled_mass(&self, density: f64, scale: f64) -> f64 {
        self.mesh.scaled_volume(scale) * density
    }
}

/// Parallel shard builder.
///
/// Partition order is arbitrary, so the default configuration seeds each
/// hull from extreme points instead of the first four.
///
/// # Example
///
/// ```rust
/// use fracture::Fracturer;
/// use glam::DVec3;
///
/// let mut points = Vec::new();
/// for x in [-2.0, -1.0, 1.0, 2.0] {
///     for y in [0.0, 1.0] {
///         for z in [0.0, 1.0] {
///             points.push(DVec3::new(x, y, z));
///         }
///     }
/// }
/// let seeds = [DVec3::new(-1.5, 0.5, 0.5), DVec3::new(1.5, 0.5, 0.5)];
///
/// let fracturer = Fracturer::default();
/// let shards = fracturer.fracture(&points, &seeds).unwrap();
/// assert_eq!(shards.len(), 2);
/// assert!((shards[0].volume - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct Fracturer {
    config: HullConfig,
    builders: ObjectPool<HullBuilder>,
}

impl Default for Fracturer {
    fn default() -> Self {
        Self::new(HullConfig::default().with_seed(SeedStrategy::Extremal))
    }
}

impl Fracturer {
    pub fn new(config: HullConfig) -> Self {
        Self {
            config,
            builders: ObjectPool::new(move || HullBuilder::new(config)),
        }
    }

    pub fn config(&self) -> &HullConfig {
        &self.config
    }

    /// Builders currently parked in the pool.
    pub fn idle_builders(&self) -> usize {
        self.builders.idle()
    }

    /// Splits `points` by nearest seed and hulls every cloud.
    ///
    /// Clouds too small to hull, or whose hull seed is flat, produce no
    /// shard. Shards come back in seed order.
    ///
    /// # Errors
    ///
    /// - [`FractureError::NoClusters`] when `seeds` is empty
    /// - [`FractureError::Hull`] for any other hull failure
    pub fn fracture(&self, points: &[DVec3], seeds: &[DVec3]) -> FractureResult<Vec<Shard>> {
        if seeds.is_empty() {
            return Err(FractureError::NoClusters);
        }

        let clouds = partition_points(points, seeds);
        log::debug!(
            "Fracturing {} points around {} seeds into {} clouds",
            points.len(),
            seeds.len(),
            clouds.len()
        );

        let shards = clouds
            .par_iter()
            .map(|cloud| self.build_shard(cloud))
            .collect::<FractureResult<Vec<_>>>()?;
        Ok(shards.into_iter().flatten().collect())
    }

    /// Clusters `points` with k-means and fractures around the centroids.
    pub fn fracture_kmeans(&self, points: &[DVec3], kmeans: &KMeans) -> FractureResult<Vec<Shard>> {
        let clustering = kmeans.cluster(points)?;
        self.fracture(points, &clustering.centroids)
    }

    fn build_shard(&self, cloud: &PointCloud) -> FractureResult<Option<Shard>> {
        let built = self.builders.with(|builder| builder.build(&cloud.points));
        match built {
            Ok(mesh) => {
                let volume = mesh.volume();
                Ok(Some(Shard {
                    seed_index: cloud.seed_index,
                    mesh,
                    volume,
                }))
            }
            Err(HullError::DegenerateSeed { message }) => {
                log::warn!("Skipping shard of seed {}: {}", cloud.seed_index, message);
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}
