//! # Convex Hull
//!
//! Incremental 3D convex hull construction for point clouds.
//!
//! ## Architecture
//!
//! ```text
//! &[DVec3] → HullBuilder (seed → grow → export) → HullMesh
//! ```
//!
//! ## Algorithms
//!
//! - **Hull**: QuickHull with explicit face adjacency; each step adds the
//!   farthest outside point, replacing the faces it sees with a cone
//! - **Horizon**: iterative depth-first flood fill that yields the boundary
//!   of the visible region as one ordered loop
//! - **Export**: flat triangle soup, three vertices and one normal per face
//!
//! ## Usage
//!
//! ```rust
//! use convex_hull::compute_convex_hull;
//! use glam::DVec3;
//!
//! let points = vec![
//!     DVec3::new(0.0, 0.0, 0.0),
//!     DVec3::new(2.0, 0.0, 0.0),
//!     DVec3::new(0.0, 2.0, 0.0),
//!     DVec3::new(0.0, 0.0, 2.0),
//!     DVec3::new(2.0, 2.0, 2.0),
//!     DVec3::new(0.5, 0.5, 0.5),
//! ];
//! let mesh = compute_convex_hull(&points).unwrap();
//! assert_eq!(mesh.unique_positions().len(), 5);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod pool;

pub use builder::{GrowthState, HullBuilder, HullStats};
pub use config::{HullConfig, SeedStrategy};
pub use error::{HullError, HullResult};
pub use mesh::HullMesh;
pub use pool::ObjectPool;

use glam::DVec3;

/// Computes the convex hull of `points` with the default configuration.
///
/// # Arguments
///
/// * `points` - Input cloud; at least four points, the first four not coplanar
///
/// # Errors
///
/// See [`HullError`] for the failure modes.
pub fn compute_convex_hull(points: &[DVec3]) -> HullResult<HullMesh> {
    compute_convex_hull_with(points, &HullConfig::default())
}

/// Computes the convex hull of `points` with an explicit configuration.
pub fn compute_convex_hull_with(points: &[DVec3], config: &HullConfig) -> HullResult<HullMesh> {
    HullBuilder::new(*config).build(points)
}
