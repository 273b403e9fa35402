//! Seed tetrahedron construction and initial point classification.

use config::constants::DEGENERATE_AREA_EPSILON;
use glam::DVec3;

use super::face::{Face, PointFace};
use super::HullBuilder;
use crate::config::SeedStrategy;
use crate::error::{HullError, HullResult};
use crate::geometry::{
    find_extreme_points, point_face_distance, point_line_distance, signed_volume6, triangle_normal,
};

/// Face layouts `(vertices, opposite)` for the two seed orientations, in
/// terms of seed slots 0..4. Face `k` is created with id `k`.
const ABOVE: [([usize; 3], [usize; 3]); 4] = [
    ([0, 2, 1], [3, 1, 2]),
    ([0, 1, 3], [3, 2, 0]),
    ([0, 3, 2], [3, 0, 1]),
    ([1, 2, 3], [2, 1, 0]),
];

const BELOW: [([usize; 3], [usize; 3]); 4] = [
    ([0, 1, 2], [3, 2, 1]),
    ([0, 3, 1], [3, 0, 2]),
    ([0, 2, 3], [3, 1, 0]),
    ([1, 3, 2], [2, 0, 1]),
];

/// Picks the four seed vertices.
pub(super) fn select_seed(points: &[DVec3], strategy: SeedStrategy) -> HullResult<[usize; 4]> {
    match strategy {
        SeedStrategy::FirstFour => Ok([0, 1, 2, 3]),
        SeedStrategy::Extremal => extremal_seed(points),
    }
}

/// Rejects seeds whose tetrahedron is flat relative to a cloud of extent
/// `scale`. `epsilon` is the already scaled distance tolerance.
pub(super) fn check_seed(
    points: &[DVec3],
    seed: [usize; 4],
    epsilon: f64,
    scale: f64,
) -> HullResult<()> {
    let [p0, p1, p2, p3] = seed.map(|i| points[i]);

    let base = (p1 - p0).cross(p2 - p0);
    if base.length() < DEGENERATE_AREA_EPSILON * scale * scale {
        log::warn!("Seed triangle {:?} has zero area", &seed[..3]);
        return Err(HullError::degenerate_seed(format!(
            "seed points {}, {}, {} are collinear or coincident",
            seed[0], seed[1], seed[2]
        )));
    }

    let height = point_face_distance(p3, p0, base.normalize());
    if height.abs() <= epsilon {
        log::warn!("Seed point {} lies in the plane of the seed triangle", seed[3]);
        return Err(HullError::degenerate_seed(format!(
            "seed point {} is coplanar with points {}, {}, {} (distance {:e})",
            seed[3], seed[0], seed[1], seed[2], height
        )));
    }
    Ok(())
}

/// Seed from the axis-extreme points: the farthest pair, then the point
/// farthest from their line, then the point farthest from that plane.
fn extremal_seed(points: &[DVec3]) -> HullResult<[usize; 4]> {
    let extremes = find_extreme_points(points);

    let mut max_dist = 0.0;
    let mut pair = (extremes[0], extremes[1]);
    for (i, &a) in extremes.iter().enumerate() {
        for &b in &extremes[i + 1..] {
            let dist = (points[a] - points[b]).length_squared();
            if dist > max_dist {
                max_dist = dist;
                pair = (a, b);
            }
        }
    }
    if max_dist == 0.0 {
        return Err(HullError::degenerate_seed("all points coincide"));
    }
    let (a, b) = pair;

    let mut max_dist = 0.0;
    let mut c = None;
    for (i, p) in points.iter().enumerate() {
        if i == a || i == b {
            continue;
        }
        let dist = point_line_distance(*p, points[a], points[b]);
        if dist > max_dist {
            max_dist = dist;
            c = Some(i);
        }
    }
    let c = c.ok_or_else(|| HullError::degenerate_seed("all points are collinear"))?;

    let normal = triangle_normal(points[a], points[b], points[c]);
    let mut max_dist = 0.0;
    let mut d = None;
    for (i, p) in points.iter().enumerate() {
        if i == a || i == b || i == c {
            continue;
        }
        let dist = point_face_distance(*p, points[a], normal).abs();
        if dist > max_dist {
            max_dist = dist;
            d = Some(i);
        }
    }
    let d = d.ok_or_else(|| HullError::degenerate_seed("all points are coplanar"))?;

    Ok([a, b, c, d])
}

impl HullBuilder {
    /// Creates the four seed faces and classifies the remaining points.
    pub(super) fn build_simplex(&mut self, points: &[DVec3], seed: [usize; 4]) {
        let [p0, p1, p2, p3] = seed.map(|i| points[i]);
        let layout = if signed_volume6(p0, p1, p2, p3) > 0.0 {
            &ABOVE
        } else {
            &BELOW
        };

        let first = self.faces.next_id();
        for &(slots, opposite) in layout {
            let vertices = slots.map(|s| seed[s]);
            let normal = triangle_normal(points[vertices[0]], points[vertices[1]], points[vertices[2]]);
            self.faces.insert(Face::new(
                vertices,
                opposite.map(|o| first + o),
                normal,
                self.open_sets.checkout(),
            ));
        }

        self.assigned = 0;
        let epsilon = self.tolerance;
        for (index, &point) in points.iter().enumerate() {
            if seed.contains(&index) {
                continue;
            }
            for id in first..first + 4 {
                let Some(face) = self.faces.get_mut(id) else {
                    continue;
                };
                if let Some(distance) = face.outside_distance(points, point, epsilon) {
                    face.open_set.push(PointFace {
                        point: index,
                        distance,
                    });
                    self.assigned += 1;
                    break;
                }
            }
        }
    }
}
