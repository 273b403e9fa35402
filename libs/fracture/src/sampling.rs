//! # Interior Sampling
//!
//! Fills a closed mesh with points: the deduplicated source vertices plus
//! uniform samples of the bounding box that pass the inside test.

use config::constants::{DEDUP_TOLERANCE, MAX_SAMPLE_ATTEMPTS_PER_POINT};
use glam::DVec3;
use rand::Rng;

use crate::error::{FractureError, FractureResult};
use crate::inside::InsideMeshTester;

/// Removes points within `tolerance` of an earlier kept point.
pub fn dedup_points(points: &[DVec3], tolerance: f64) -> Vec<DVec3> {
    let mut kept: Vec<DVec3> = Vec::with_capacity(points.len());
    for p in points {
        if !kept.iter().any(|k| k.distance(*p) <= tolerance) {
            kept.push(*p);
        }
    }
    kept
}

/// Returns at least `count` points inside the mesh `(vertices, triangles)`.
///
/// The deduplicated vertices come first; if they already number `count` or
/// more, no sampling happens.
///
/// # Errors
///
/// - [`FractureError::IndexOutOfBounds`] for a malformed mesh
/// - [`FractureError::SamplingExhausted`] if the attempt budget runs out,
///   e.g. for an open or inside-out mesh
pub fn sample_interior_points<R: Rng + ?Sized>(
    vertices: &[DVec3],
    triangles: &[[u32; 3]],
    count: usize,
    rng: &mut R,
) -> FractureResult<Vec<DVec3>> {
    let tester = InsideMeshTester::new(vertices, triangles)?;
    let mut points = dedup_points(vertices, DEDUP_TOLERANCE);
    if points.len() >= count {
        return Ok(points);
    }

    let (min, max) = bounds(vertices);
    let extent = max - min;
    let wanted = count - points.len();
    let budget = wanted.saturating_mul(MAX_SAMPLE_ATTEMPTS_PER_POINT);

    let mut attempts = 0;
    while points.len() < count {
        if attempts == budget {
            log::warn!(
                "Interior sampling gave up after {} attempts with {} of {} points",
                attempts,
                points.len(),
                count
            );
            return Err(FractureError::SamplingExhausted {
                wanted: count,
                found: points.len(),
            });
        }
        attempts += 1;

        let sample = min + extent * DVec3::new(rng.random(), rng.random(), rng.random());
        if tester.is_inside(sample) {
            points.push(sample);
        }
    }

    log::debug!("Sampled {} interior points in {} attempts", wanted, attempts);
    Ok(points)
}

fn bounds(vertices: &[DVec3]) -> (DVec3, DVec3) {
    let Some(first) = vertices.first() else {
        return (DVec3::ZERO, DVec3::ZERO);
    };
    vertices
        .iter()
        .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tetrahedron() -> (Vec<DVec3>, Vec<[u32; 3]>) {
        let vertices = vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z];
        let triangles = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
        (vertices, triangles)
    }

    #[test]
    fn test_dedup_points() {
        let points = vec![
            DVec3::ZERO,
            DVec3::new(5.0e-6, 0.0, 0.0),
            DVec3::X,
            DVec3::new(1.0, 1.0e-6, 0.0),
            DVec3::Y,
        ];
        assert_eq!(dedup_points(&points, DEDUP_TOLERANCE), vec![DVec3::ZERO, DVec3::X, DVec3::Y]);
    }

    #[test]
    fn test_samples_lie_inside() {
        let (vertices, triangles) = tetrahedron();
        let mut rng = StdRng::seed_from_u64(17);
        let points = sample_interior_points(&vertices, &triangles, 200, &mut rng).unwrap();

        assert_eq!(points.len(), 200);
        assert_eq!(&points[..4], vertices.as_slice());
        for p in &points[4..] {
            assert!(p.min_element() >= 0.0);
            assert!(p.x + p.y + p.z <= 1.0);
        }
    }

    #[test]
    fn test_enough_vertices_skips_sampling() {
        let (vertices, triangles) = tetrahedron();
        let mut rng = StdRng::seed_from_u64(0);
        let points = sample_interior_points(&vertices, &triangles, 3, &mut rng).unwrap();
        assert_eq!(points, vertices);
    }

    #[test]
    fn test_open_mesh_exhausts_budget() {
        let vertices = vec![DVec3::ZERO, DVec3::X, DVec3::Z, DVec3::new(1.0, 1.0, 1.0)];
        // a single triangle has no interior for rays starting above it
        let triangles = vec![[0, 1, 2]];
        let mut rng = StdRng::seed_from_u64(3);
        let sampled = sample_interior_points(&vertices, &triangles, 10, &mut rng);
        match sampled {
            Err(FractureError::SamplingExhausted { wanted: 10, found }) => assert!(found >= 4),
            other => panic!("expected sampling to run out, got {other:?}"),
        }
    }
}
