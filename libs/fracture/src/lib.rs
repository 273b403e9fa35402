//! # Fracture
//!
//! Consumers of the convex hull builder: split a point cloud into convex
//! shards and estimate their mass.
//!
//! ## Architecture
//!
//! ```text
//! closed mesh → sampling (interior points)
//!             → seeds / k-means (centroids)
//!             → partition (one cloud per seed)
//!             → Fracturer (parallel hulls) → Vec<Shard>
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use fracture::{sample_interior_points, seeds_around, Fracturer};
//! use glam::DVec3;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let vertices = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
//! let triangles = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
//! let mut rng = StdRng::seed_from_u64(0);
//!
//! let points = sample_interior_points(&vertices, &triangles, 500, &mut rng).unwrap();
//! let seeds = seeds_around(DVec3::splat(0.2), 0.5, 4, &mut rng);
//! let shards = Fracturer::default().fracture(&points, &seeds).unwrap();
//! assert!(shards.iter().map(|s| s.volume).sum::<f64>() <= 1.0 / 6.0 + 1e-9);
//! ```

pub mod error;
pub mod inside;
pub mod job;
pub mod kmeans;
pub mod partition;
pub mod sampling;
pub mod seeds;
pub mod shards;

pub use error::{FractureError, FractureResult};
pub use inside::InsideMeshTester;
pub use job::HullJob;
pub use kmeans::{Clustering, KMeans};
pub use partition::{assign_to_seeds, nearest_seed, partition_points, PointCloud};
pub use sampling::{dedup_points, sample_interior_points};
pub use seeds::{random_unit_vector, seeds_around, seeds_from_points};
pub use shards::{Fracturer, Shard};
