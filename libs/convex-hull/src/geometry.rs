//! Geometric predicates shared by every hull stage.

use glam::DVec3;

/// Signed distance from `point` to the plane through `anchor` with unit
/// `normal`. Positive values lie on the side the normal points to.
#[inline]
pub fn point_face_distance(point: DVec3, anchor: DVec3, normal: DVec3) -> f64 {
    normal.dot(point - anchor)
}

/// Outward unit normal of the CCW triangle `(p0, p1, p2)`.
///
/// Returns zero for a zero-area triangle rather than NaN.
#[inline]
pub fn triangle_normal(p0: DVec3, p1: DVec3, p2: DVec3) -> DVec3 {
    (p1 - p0).cross(p2 - p0).normalize_or_zero()
}

/// Six times the signed volume of the tetrahedron `(p0, p1, p2, p3)`.
///
/// Positive when `p3` lies on the side of `(p0, p1, p2)` that a CCW
/// winding's normal points to.
#[inline]
pub fn signed_volume6(p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3) -> f64 {
    (p3 - p1).dot((p1 - p0).cross(p2 - p0))
}

/// Distance from `point` to the infinite line through `a` and `b`.
pub fn point_line_distance(point: DVec3, a: DVec3, b: DVec3) -> f64 {
    let dir = b - a;
    let len = dir.length();
    if len == 0.0 {
        return (point - a).length();
    }
    dir.cross(point - a).length() / len
}

/// Indices of the min and max point on each axis, as
/// `[min_x, max_x, min_y, max_y, min_z, max_z]`. Ties keep the first index.
pub fn find_extreme_points(points: &[DVec3]) -> [usize; 6] {
    let mut extremes = [0; 6];
    for (i, p) in points.iter().enumerate() {
        for axis in 0..3 {
            if p[axis] < points[extremes[2 * axis]][axis] {
                extremes[2 * axis] = i;
            }
            if p[axis] > points[extremes[2 * axis + 1]][axis] {
                extremes[2 * axis + 1] = i;
            }
        }
    }
    extremes
}

/// Largest axis-aligned span of `points`, zero when empty.
pub fn cloud_extent(points: &[DVec3]) -> f64 {
    let Some(first) = points.first() else {
        return 0.0;
    };
    let (min, max) = points
        .iter()
        .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
    (max - min).max_element()
}
