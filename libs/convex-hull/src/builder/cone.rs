//! Cone construction and point reassignment.

use glam::DVec3;

use super::face::{Face, PointFace};
use super::HullBuilder;
use crate::error::{HullError, HullResult};
use crate::geometry::triangle_normal;

impl HullBuilder {
    /// Replaces the lit faces with a fan of faces from `apex` to the horizon.
    ///
    /// Points owned by the lit faces are moved into the reassignment worklist.
    pub(super) fn construct_cone(&mut self, points: &[DVec3], apex: usize) -> HullResult<()> {
        self.pending.clear();
        for &id in &self.lit_order {
            let face = self
                .faces
                .remove(id)
                .ok_or_else(|| HullError::topology(format!("lit face {id} was already removed")))?;
            self.assigned -= face.open_set.len();
            self.pending.extend(face.open_set.iter().map(|pf| pf.point));
            self.open_sets.give_back(face.open_set);
        }

        let count = self.horizon.len();
        if count < 3 {
            return Err(HullError::topology(format!(
                "horizon of point {apex} has {count} edges"
            )));
        }

        self.added.clear();
        let first = self.faces.next_id();
        for (i, edge) in self.horizon.iter().enumerate() {
            let [a, b] = edge.edge;
            let next = first + (i + 1) % count;
            let prev = first + (i + count - 1) % count;
            let normal = triangle_normal(points[apex], points[a], points[b]);

            let id = self.faces.insert(Face::new(
                [apex, a, b],
                [edge.face, next, prev],
                normal,
                self.open_sets.checkout(),
            ));

            let neighbor = self.faces.get_mut(edge.face).ok_or_else(|| {
                HullError::topology(format!("horizon face {} is missing", edge.face))
            })?;
            let slot = neighbor.edge_slot(b, a).ok_or_else(|| {
                HullError::topology(format!(
                    "horizon face {} does not contain edge {b} -> {a}",
                    edge.face
                ))
            })?;
            neighbor.opposite[slot] = id;
            self.added.push(id);
        }

        Ok(())
    }

    /// Classifies orphaned points against the new cone faces only.
    ///
    /// A point outside a deleted face is either outside one of the cone
    /// faces or inside the grown hull; the apex itself is always enclosed.
    pub(super) fn reassign_points(&mut self, points: &[DVec3], apex: usize) {
        let epsilon = self.tolerance;
        for &index in &self.pending {
            if index == apex {
                continue;
            }
            let point = points[index];
            for &id in &self.added {
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
