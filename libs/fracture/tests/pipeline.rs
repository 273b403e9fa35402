use std::sync::Arc;

use convex_hull::{compute_convex_hull_with, HullConfig, SeedStrategy};
use fracture::{
    sample_interior_points, seeds_around, Fracturer, HullJob, InsideMeshTester, KMeans,
};
use glam::DVec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn extremal() -> HullConfig {
    HullConfig::default().with_seed(SeedStrategy::Extremal)
}

/// Octahedron with outward CCW triangles.
fn octahedron() -> (Vec<DVec3>, Vec<[u32; 3]>) {
    let vertices = vec![DVec3::X, -DVec3::X, DVec3::Y, -DVec3::Y, DVec3::Z, -DVec3::Z];
    let triangles = vec![
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];
    (vertices, triangles)
}

#[test]
fn sample_then_fracture_octahedron() {
    let (vertices, triangles) = octahedron();
    let mut rng = StdRng::seed_from_u64(99);
    let points = sample_interior_points(&vertices, &triangles, 3000, &mut rng).unwrap();
    assert_eq!(points.len(), 3000);

    let whole = compute_convex_hull_with(&points, &extremal()).unwrap();
    assert!((whole.volume() - 4.0 / 3.0).abs() < 1e-9);

    let seeds = seeds_around(DVec3::new(0.3, 0.0, 0.0), 0.8, 10, &mut rng);
    let shards = Fracturer::default().fracture(&points, &seeds).unwrap();
    let total: f64 = shards.iter().map(|s| s.volume).sum();
    assert!(total > 0.5 && total <= whole.volume() + 1e-9);

    let tester = InsideMeshTester::from_hull(&whole);
    for shard in &shards {
        let [p0, p1, p2] = shard.mesh.triangle_corners(0);
        // shard corners are input points, so pull them slightly inward
        let centroid = (p0 + p1 + p2) / 3.0;
        assert!(tester.is_inside(centroid * 0.999));
    }
}

#[test]
fn kmeans_shards_have_mass() {
    let (vertices, triangles) = octahedron();
    let mut rng = StdRng::seed_from_u64(5);
    let points = sample_interior_points(&vertices, &triangles, 1500, &mut rng).unwrap();

    let shards = Fracturer::default()
        .fracture_kmeans(&points, &KMeans::new(5))
        .unwrap();
    assert!(!shards.is_empty());
    for shard in &shards {
        assert!(shard.mass(2.0) > 0.0);
        assert!((shard.mass(2.0) - 2.0 * shard.volume).abs() < 1e-12);
    }
}

#[test]
fn background_job_matches_direct_build() {
    let (vertices, triangles) = octahedron();
    let mut rng = StdRng::seed_from_u64(1);
    let points = sample_interior_points(&vertices, &triangles, 500, &mut rng).unwrap();

    let direct = compute_convex_hull_with(&points, &extremal()).unwrap();
    let job = HullJob::spawn(Arc::from(points), extremal());
    assert_eq!(job.wait().unwrap(), direct);
}
