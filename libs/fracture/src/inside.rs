//! # Point-in-Mesh Test
//!
//! Ray parity test: a point is inside a closed mesh when a ray cast along
//! `+Y` crosses its surface an odd number of times.

use convex_hull::HullMesh;
use glam::DVec3;

use crate::error::{FractureError, FractureResult};

/// Point-in-mesh tester over a flattened triangle list.
#[derive(Debug, Clone, Default)]
pub struct InsideMeshTester {
    triangles: Vec<[DVec3; 3]>,
}

impl InsideMeshTester {
    /// Builds a tester from an indexed mesh.
    ///
    /// # Errors
    ///
    /// [`FractureError::IndexOutOfBounds`] if a triangle references a
    /// missing vertex.
    pub fn new(vertices: &[DVec3], triangles: &[[u32; 3]]) -> FractureResult<Self> {
        let corner = |index: u32| {
            vertices
                .get(index as usize)
                .copied()
                .ok_or(FractureError::IndexOutOfBounds {
                    index,
                    len: vertices.len(),
                })
        };

        let triangles = triangles
            .iter()
            .map(|&[a, b, c]| Ok([corner(a)?, corner(b)?, corner(c)?]))
            .collect::<FractureResult<Vec<_>>>()?;
        Ok(Self { triangles })
    }

    /// Builds a tester from an exported hull.
    pub fn from_hull(mesh: &HullMesh) -> Self {
        Self {
            triangles: (0..mesh.triangle_count())
                .map(|t| mesh.triangle_corners(t))
                .collect(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if `point` lies inside the mesh.
    ///
    /// Rays that graze an edge or vertex exactly are not counted, so points
    /// whose `+Y` ray passes through a mesh edge may be misclassified.
    pub fn is_inside(&self, point: DVec3) -> bool {
        let crossings = self
            .triangles
            .iter()
            .filter(|&&[v0, v1, v2]| ray_hits_triangle(point, DVec3::Y, v0, v1, v2))
            .count();
        crossings % 2 == 1
    }
}

/// Möller–Trumbore intersection, counting only strict interior hits in front
/// of the origin.
fn ray_hits_triangle(origin: DVec3, dir: DVec3, v0: DVec3, v1: DVec3, v2: DVec3) -> bool {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    let p = dir.cross(e2);
    let det = p.dot(e1);
    if det == 0.0 {
        return false;
    }

    let inv = 1.0 / det;
    let t_vec = origin - v0;
    let q = t_vec.cross(e1);

    let t = q.dot(e2) * inv;
    let u = p.dot(t_vec) * inv;
    let v = q.dot(dir) * inv;
    t > 0.0 && u > 0.0 && v > 0.0 && u + v < 1.0
}
