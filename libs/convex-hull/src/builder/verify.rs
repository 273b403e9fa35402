//! Consistency checks for the face structure.
//!
//! Enabled through [`HullConfig::verify`](crate::HullConfig::verify). Each
//! check is linear in the number of faces (containment is points × faces),
//! so they stay off the hot path in release builds.

use glam::DVec3;

use super::face::{FaceArena, OpenSetPool};
use super::horizon::HorizonEdge;
use crate::error::{HullError, HullResult};
use crate::geometry::{point_face_distance, triangle_normal};
use crate::mesh::HullMesh;

/// Adjacency, vertex and normal invariants of every live face.
pub(super) fn check_faces(faces: &FaceArena, points: &[DVec3], epsilon: f64) -> HullResult<()> {
    for (id, face) in faces.iter() {
        let [v0, v1, v2] = face.vertices;
        if v0 == v1 || v1 == v2 || v0 == v2 {
            return Err(HullError::topology(format!(
                "face {id} repeats a vertex: {:?}",
                face.vertices
            )));
        }

        for k in 0..3 {
            let other = face.opposite[k];
            if other == id {
                return Err(HullError::topology(format!("face {id} is its own neighbor")));
            }
            let neighbor = faces.get(other).ok_or_else(|| {
                HullError::topology(format!("face {id} references missing face {other}"))
            })?;
            let (a, b) = face.edge(k);
            if !neighbor.has_edge(b, a) {
                return Err(HullError::topology(format!(
                    "face {other} does not share edge {a} -> {b} of face {id}"
                )));
            }
        }

        let expected = triangle_normal(points[v0], points[v1], points[v2]);
        if (face.normal - expected).length() >= epsilon {
            return Err(HullError::topology(format!(
                "face {id} normal {} differs from recomputed {expected}",
                face.normal
            )));
        }
    }
    Ok(())
}

/// Open-set distances exceed the tolerance and sum to the assignment counter.
pub(super) fn check_open_sets(faces: &FaceArena, assigned: usize, epsilon: f64) -> HullResult<()> {
    let mut count = 0;
    for (id, face) in faces.iter() {
        count += face.open_set.len();
        if let Some(pf) = face.open_set.iter().find(|pf| pf.distance <= epsilon) {
            return Err(HullError::topology(format!(
                "point {} in open set of face {id} has distance {}",
                pf.point, pf.distance
            )));
        }
    }
    if count != assigned {
        return Err(HullError::topology(format!(
            "assignment counter is {assigned} but open sets hold {count} points"
        )));
    }
    Ok(())
}

/// The horizon is one closed loop and each unlit face holds its edge reversed.
pub(super) fn check_horizon(horizon: &[HorizonEdge], faces: &FaceArena) -> HullResult<()> {
    for (i, edge) in horizon.iter().enumerate() {
        let prev = &horizon[(i + horizon.len() - 1) % horizon.len()];
        if prev.edge[1] != edge.edge[0] {
            return Err(HullError::topology(format!(
                "horizon edge {i} starts at {} but previous edge ends at {}",
                edge.edge[0], prev.edge[1]
            )));
        }
        let holds_edge = faces
            .get(edge.face)
            .is_some_and(|face| face.has_edge(edge.edge[1], edge.edge[0]));
        if !holds_edge {
            return Err(HullError::topology(format!(
                "horizon face {} does not hold edge {} -> {}",
                edge.face, edge.edge[1], edge.edge[0]
            )));
        }
    }
    Ok(())
}

/// Every open-set container went back to the pool.
pub(super) fn check_pool_returned(pool: &OpenSetPool) -> HullResult<()> {
    if pool.lent() != 0 {
        return Err(HullError::topology(format!(
            "{} open sets were never returned",
            pool.lent()
        )));
    }
    Ok(())
}

/// Every input point lies on or inside every exported triangle.
pub(super) fn check_containment(points: &[DVec3], mesh: &HullMesh, epsilon: f64) -> HullResult<()> {
    let vertices = mesh.vertices();
    let normals = mesh.normals();
    for (t, tri) in mesh.triangles().iter().enumerate() {
        let anchor = vertices[tri[0] as usize];
        let normal = normals[tri[0] as usize];
        if let Some((i, p)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| point_face_distance(**p, anchor, normal) > epsilon)
        {
            return Err(HullError::topology(format!(
                "point {i} {p} lies outside hull triangle {t}"
            )));
        }
    }
    Ok(())
}
