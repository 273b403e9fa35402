//! Random fracture seed generators.

use glam::DVec3;
use rand::Rng;

/// Picks `count` seeds among the existing points, with replacement.
///
/// Returns no seeds for an empty cloud.
pub fn seeds_from_points<R: Rng + ?Sized>(points: &[DVec3], count: usize, rng: &mut R) -> Vec<DVec3> {
    if points.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|_| points[rng.random_range(0..points.len())])
        .collect()
}

/// Generates `count` seeds clustered around an impact point.
///
/// Each seed sits at `center + r * dir` where `dir` is a uniform random unit
/// vector and `r = (u * max_radius)^2` for uniform `u` in `[0, 1)`, which
/// concentrates seeds near the center.
pub fn seeds_around<R: Rng + ?Sized>(center: DVec3, max_radius: f64, count: usize, rng: &mut R) -> Vec<DVec3> {
    (0..count)
        .map(|_| {
            let dir = random_unit_vector(rng);
            let radius = rng.random::<f64>() * max_radius;
            center + dir * (radius * radius)
        })
        .collect()
}

/// Uniform random direction by rejection sampling the unit ball.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> DVec3 {
    loop {
        let v = DVec3::new(
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
            rng.random_range(-1.0..=1.0),
        );
        let len_sq = v.length_squared();
        if len_sq > 1.0e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seeds_from_points_are_input_points() {
        let mut rng = StdRng::seed_from_u64(5);
        let points = vec![DVec3::X, DVec3::Y, DVec3::Z];
        let seeds = seeds_from_points(&points, 10, &mut rng);
        assert_eq!(seeds.len(), 10);
        assert!(seeds.iter().all(|s| points.contains(s)));
        assert!(seeds_from_points(&[], 3, &mut rng).is_empty());
    }

    #[test]
    fn test_seeds_around_stay_within_squared_radius() {
        let mut rng = StdRng::seed_from_u64(9);
        let center = DVec3::new(1.0, 2.0, 3.0);
        let max_radius = 0.5;
        let seeds = seeds_around(center, max_radius, 200, &mut rng);
        assert_eq!(seeds.len(), 200);
        for s in &seeds {
            assert!(s.distance(center) <= max_radius * max_radius + 1e-12);
        }
    }

    #[test]
    fn test_random_unit_vector_is_normalized() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-12);
        }
    }
}
