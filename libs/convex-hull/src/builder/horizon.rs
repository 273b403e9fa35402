//! # Horizon Search
//!
//! Depth-first flood fill over face adjacency from the face the apex was
//! measured against. Faces the apex sees are lit; every crossing from a lit
//! face into an unlit one contributes a horizon edge.
//!
//! The search walks each face's edges counter-clockwise starting after the
//! edge it was entered through, so edges are emitted as one closed CCW loop
//! (seen from outside) in the order the cone needs them.

use glam::DVec3;

use super::face::FaceId;
use super::HullBuilder;
use crate::error::{HullError, HullResult};

/// An edge of the horizon loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizonEdge {
    /// The unlit face across the edge.
    pub face: FaceId,
    /// Edge as directed on the lit side; the unlit face holds `edge[1] -> edge[0]`.
    pub edge: [usize; 2],
}

/// Pending crossings of one lit face.
#[derive(Debug, Clone, Copy)]
pub(super) struct SearchFrame {
    face: FaceId,
    /// Next opposite slot to cross (taken mod 3).
    next: usize,
    remaining: usize,
}

impl HullBuilder {
    /// Collects the lit faces and the horizon loop seen from `apex`.
    ///
    /// `seed` must be a face the apex is strictly outside of.
    pub(super) fn find_horizon(&mut self, points: &[DVec3], apex: usize, seed: FaceId) -> HullResult<()> {
        self.lit.clear();
        self.lit_order.clear();
        self.horizon.clear();
        self.stack.clear();

        let point = points[apex];
        self.lit.insert(seed);
        self.lit_order.push(seed);
        self.stack.push(SearchFrame {
            face: seed,
            next: 0,
            remaining: 3,
        });

        while let Some(frame) = self.stack.last_mut() {
            if frame.remaining == 0 {
                self.stack.pop();
                continue;
            }
            let current = frame.face;
            let slot = frame.next % 3;
            frame.next += 1;
            frame.remaining -= 1;

            let face = self
                .faces
                .get(current)
                .ok_or_else(|| HullError::topology(format!("lit face {current} is missing")))?;
            let neighbor_id = face.opposite[slot];
            let (a, b) = face.edge(slot);

            if self.lit.contains(&neighbor_id) {
                continue;
            }

            let neighbor = self.faces.get(neighbor_id).ok_or_else(|| {
                HullError::topology(format!("face {current} references missing face {neighbor_id}"))
            })?;

            if neighbor.distance(points, point) <= 0.0 {
                self.horizon.push(HorizonEdge {
                    face: neighbor_id,
                    edge: [a, b],
                });
            } else {
                let entry = neighbor.slot_of(current).ok_or_else(|| {
                    HullError::topology(format!(
                        "face {neighbor_id} does not link back to face {current}"
                    ))
                })?;
                self.lit.insert(neighbor_id);
                self.lit_order.push(neighbor_id);
                self.stack.push(SearchFrame {
                    face: neighbor_id,
                    next: entry + 1,
                    remaining: 2,
                });
            }
        }

        Ok(())
    }
}
