//! # Nearest-Seed Partitioning
//!
//! Splits a point cloud into one cloud per seed, Voronoi style.

use config::constants::MIN_HULL_POINTS;
use glam::DVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Points that share a nearest seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    /// Index of the seed the points are closest to.
    pub seed_index: usize,
    pub points: Vec<DVec3>,
}

/// Index of the seed closest to `point`; the first minimum wins.
#[inline]
pub fn nearest_seed(point: DVec3, seeds: &[DVec3]) -> Option<usize> {
    let mut best = None;
    let mut best_dist = f64::INFINITY;
    for (i, seed) in seeds.iter().enumerate() {
        let dist = point.distance_squared(*seed);
        if dist < best_dist {
            best_dist = dist;
            best = Some(i);
        }
    }
    best
}

/// Nearest seed of every point, computed in parallel.
///
/// Returns an empty vector when there are no seeds.
pub fn assign_to_seeds(points: &[DVec3], seeds: &[DVec3]) -> Vec<usize> {
    if seeds.is_empty() {
        return Vec::new();
    }
    points
        .par_iter()
        .map(|p| nearest_seed(*p, seeds).unwrap_or(0))
        .collect()
}

/// Groups points by nearest seed.
///
/// Clouds with fewer than four points cannot be hulled and are dropped.
/// Kept clouds are returned in seed order and preserve input point order.
pub fn partition_points(points: &[DVec3], seeds: &[DVec3]) -> Vec<PointCloud> {
    let assigned = assign_to_seeds(points, seeds);

    let mut buckets: Vec<Vec<DVec3>> = vec![Vec::new(); seeds.len()];
    for (point, &seed) in points.iter().zip(&assigned) {
        buckets[seed].push(*point);
    }

    buckets
        .into_iter()
        .enumerate()
        .filter_map(|(seed_index, points)| {
            if points.len() < MIN_HULL_POINTS {
                if !points.is_empty() {
                    log::warn!(
                        "Dropping cloud of seed {} with {} points",
                        seed_index,
                        points.len()
                    );
                }
                return None;
            }
            Some(PointCloud { seed_index, points })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_seed_first_minimum_wins() {
        let seeds = [DVec3::new(-1.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0)];
        assert_eq!(nearest_seed(DVec3::new(-0.2, 0.0, 0.0), &seeds), Some(0));
        assert_eq!(nearest_seed(DVec3::new(0.3, 5.0, 0.0), &seeds), Some(1));
        assert_eq!(nearest_seed(DVec3::ZERO, &seeds), Some(0));
        assert_eq!(nearest_seed(DVec3::ZERO, &[]), None);
    }

    #[test]
    fn test_partition_drops_small_clouds() {
        let mut points = Vec::new();
        for i in 0..6 {
            points.push(DVec3::new(-10.0 - i as f64, (i % 2) as f64, (i % 3) as f64));
        }
        points.push(DVec3::new(10.0, 0.0, 0.0));
        points.push(DVec3::new(11.0, 0.0, 0.0));

        let seeds = [DVec3::new(-10.0, 0.0, 0.0), DVec3::new(10.0, 0.0, 0.0), DVec3::new(0.0, 100.0, 0.0)];
        let clouds = partition_points(&points, &seeds);

        assert_eq!(clouds.len(), 1);
        assert_eq!(clouds[0].seed_index, 0);
        assert_eq!(clouds[0].points, points[..6].to_vec());
    }

    #[test]
    fn test_assign_without_seeds() {
        assert!(assign_to_seeds(&[DVec3::ZERO], &[]).is_empty());
        assert!(partition_points(&[DVec3::ZERO; 8], &[]).is_empty());
    }
}
