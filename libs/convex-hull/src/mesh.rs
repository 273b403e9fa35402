//! # Hull Mesh
//!
//! Flat triangle soup produced by the exporter: every face owns three
//! vertices, each carrying the face normal.

use std::collections::{HashMap, HashSet};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{HullError, HullResult};

/// An exported convex hull.
///
/// Triangle `i` always references vertices `3i, 3i + 1, 3i + 2`, and
/// `normals[j]` is the outward unit normal of the triangle owning vertex `j`.
///
/// # Example
///
/// ```rust
/// use convex_hull::compute_convex_hull;
/// use glam::DVec3;
///
/// let points = vec![
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
/// ];
/// let mesh = compute_convex_hull(&points).unwrap();
/// assert_eq!(mesh.vertex_count(), 12);
/// assert!((mesh.volume() - 1.0 / 6.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HullMesh {
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
    normals: Vec<DVec3>,
}

impl HullMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties all buffers, keeping their allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.triangles.clear();
        self.normals.clear();
    }

    pub(crate) fn reserve(&mut self, face_count: usize) {
        self.vertices.reserve(face_count * 3);
        self.normals.reserve(face_count * 3);
        self.triangles.reserve(face_count);
    }

    /// Appends one face as three fresh vertices.
    pub(crate) fn push_face(&mut self, corners: [DVec3; 3], normal: DVec3) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&corners);
        self.normals.extend_from_slice(&[normal; 3]);
        self.triangles.push([base, base + 1, base + 2]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    #[inline]
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    /// Corner positions of triangle `index`.
    pub fn triangle_corners(&self, index: usize) -> [DVec3; 3] {
        self.triangles[index].map(|v| self.vertices[v as usize])
    }

    // =========================================================================
    // MEASURES
    // =========================================================================

    /// Enclosed volume, summed over origin-apex tetrahedra.
    ///
    /// Positive for an outward-wound closed mesh.
    pub fn volume(&self) -> f64 {
        (0..self.triangle_count())
            .map(|t| {
                let [p0, p1, p2] = self.triangle_corners(t);
                p0.dot(p1.cross(p2))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Volume of the mesh after uniform scaling by `scale`.
    pub fn scaled_volume(&self, scale: f64) -> f64 {
        self.volume() * scale * scale * scale
    }

    /// Total triangle area.
    pub fn surface_area(&self) -> f64 {
        (0..self.triangle_count())
            .map(|t| {
                let [p0, p1, p2] = self.triangle_corners(t);
                (p1 - p0).cross(p2 - p0).length() * 0.5
            })
            .sum()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(first) = self.vertices.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        self.vertices
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Distinct vertex positions in first-seen order.
    pub fn unique_positions(&self) -> Vec<DVec3> {
        let mut seen = HashSet::new();
        self.vertices
            .iter()
            .filter(|v| seen.insert(position_key(**v)))
            .copied()
            .collect()
    }

    /// Checks that the triangles form a closed, consistently wound surface.
    ///
    /// Vertices are matched by position because the flat export duplicates
    /// shared corners. Every directed edge must occur exactly once and its
    /// reverse exactly once.
    pub fn validate_closed(&self) -> HullResult<()> {
        let mut edges: HashMap<(PositionKey, PositionKey), usize> = HashMap::new();
        for t in 0..self.triangle_count() {
            let keys = self.triangle_corners(t).map(position_key);
            for k in 0..3 {
                *edges.entry((keys[k], keys[(k + 1) % 3])).or_insert(0) += 1;
            }
        }

        for (&(a, b), &count) in &edges {
            if count != 1 {
                return Err(HullError::topology(format!(
                    "directed edge used {count} times"
                )));
            }
            if edges.get(&(b, a)) != Some(&1) {
                return Err(HullError::topology("edge has no reversed twin"));
            }
        }
        Ok(())
    }

    // =========================================================================
    // GPU EXPORT
    // =========================================================================

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        flatten_f32(&self.vertices)
    }

    /// Exports triangle indices as u32 array for GPU.
    ///
    /// Returns flattened [i0, i1, i2, i0, i1, i2, ...] array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Exports normals as f32 array for GPU.
    pub fn normals_f32(&self) -> Vec<f32> {
        flatten_f32(&self.normals)
    }
}

type PositionKey = [u64; 3];

fn position_key(v: DVec3) -> PositionKey {
    // +0.0 and -0.0 compare equal but differ in bits
    let v = v + DVec3::ZERO;
    [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()]
}

fn flatten_f32(values: &[DVec3]) -> Vec<f32> {
    let mut result = Vec::with_capacity(values.len() * 3);
    for v in values {
        result.push(v.x as f32);
        result.push(v.y as f32);
        result.push(v.z as f32);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_tetrahedron() -> HullMesh {
        let o = DVec3::ZERO;
        let (x, y, z) = (DVec3::X, DVec3::Y, DVec3::Z);
        let mut mesh = HullMesh::new();
        for [a, b, c] in [[o, y, x], [o, x, z], [o, z, y], [x, y, z]] {
            let normal = (b - a).cross(c - a).normalize();
            mesh.push_face([a, b, c], normal);
        }
        mesh
    }

    #[test]
    fn test_push_face_layout() {
        let mesh = unit_tetrahedron();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.normals().len(), 12);
        assert_eq!(mesh.triangles()[2], [6, 7, 8]);
        assert_eq!(mesh.normals()[3], mesh.normals()[5]);
    }

    #[test]
    fn test_volume_and_area() {
        let mesh = unit_tetrahedron();
        assert_relative_eq!(mesh.volume(), 1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(mesh.scaled_volume(2.0), 8.0 / 6.0, epsilon = 1e-12);
        let expected_area = 1.5 + 3.0_f64.sqrt() / 2.0;
        assert_relative_eq!(mesh.surface_area(), expected_area, epsilon = 1e-12);
    }

    #[test]
    fn test_unique_positions() {
        let mesh = unit_tetrahedron();
        assert_eq!(mesh.unique_positions().len(), 4);
    }

    #[test]
    fn test_validate_closed() {
        let mesh = unit_tetrahedron();
        assert!(mesh.validate_closed().is_ok());

        let mut open = HullMesh::new();
        open.push_face([DVec3::ZERO, DVec3::X, DVec3::Y], DVec3::Z);
        assert!(open.validate_closed().is_err());
    }

    #[test]
    fn test_bounding_box() {
        let mesh = unit_tetrahedron();
        assert_eq!(mesh.bounding_box(), (DVec3::ZERO, DVec3::ONE));
        assert_eq!(HullMesh::new().bounding_box(), (DVec3::ZERO, DVec3::ZERO));
    }

    #[test]
    fn test_gpu_export() {
        let mut mesh = HullMesh::new();
        mesh.push_face([DVec3::new(1.0, 2.0, 3.0), DVec3::X, DVec3::Y], DVec3::Z);
        assert_eq!(&mesh.vertices_f32()[..3], &[1.0f32, 2.0, 3.0]);
        assert_eq!(mesh.indices_u32(), vec![0, 1, 2]);
        assert_eq!(&mesh.normals_f32()[6..], &[0.0f32, 0.0, 1.0]);
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut mesh = unit_tetrahedron();
        let capacity = mesh.vertices.capacity();
        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertices.capacity(), capacity);
    }
}
