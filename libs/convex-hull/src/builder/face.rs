//! # Face Model
//!
//! Directed hull triangles with full adjacency, the arena that owns them and
//! the free list that recycles their open sets.

use glam::DVec3;

use crate::geometry::point_face_distance;

/// Stable face identifier: the face's slot in the [`FaceArena`].
pub type FaceId = usize;

/// A point sitting in a face's open set with its distance to the face plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointFace {
    /// Index into the input point set.
    pub point: usize,
    /// Signed distance to the owning face, always above the hull epsilon.
    pub distance: f64,
}

/// A hull triangle, CCW when seen from outside.
///
/// `opposite[k]` is the face across the edge that does not touch
/// `vertices[k]`, i.e. the edge `(vertices[k + 1], vertices[k + 2])`.
#[derive(Debug, Clone)]
pub struct Face {
    pub vertices: [usize; 3],
    pub opposite: [FaceId; 3],
    /// Outward unit normal.
    pub normal: DVec3,
    pub open_set: Vec<PointFace>,
}

impl Face {
    pub fn new(vertices: [usize; 3], opposite: [FaceId; 3], normal: DVec3, open_set: Vec<PointFace>) -> Self {
        Self {
            vertices,
            opposite,
            normal,
            open_set,
        }
    }

    /// Signed distance from `point` to this face's plane.
    #[inline]
    pub fn distance(&self, points: &[DVec3], point: DVec3) -> f64 {
        point_face_distance(point, points[self.vertices[0]], self.normal)
    }

    /// Distance of `point` if it lies strictly more than `epsilon` outside.
    ///
    /// This is the classification test for both the seed tetrahedron and
    /// post-cone reassignment.
    #[inline]
    pub fn outside_distance(&self, points: &[DVec3], point: DVec3, epsilon: f64) -> Option<f64> {
        let distance = self.distance(points, point);
        (distance > epsilon).then_some(distance)
    }

    /// Returns true if the directed edge `a -> b` belongs to this face.
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        let v = self.vertices;
        (v[0] == a && v[1] == b) || (v[1] == a && v[2] == b) || (v[2] == a && v[0] == b)
    }

    /// Slot `k` whose edge `(vertices[k + 1], vertices[k + 2])` is `a -> b`.
    pub fn edge_slot(&self, a: usize, b: usize) -> Option<usize> {
        (0..3).find(|&k| self.vertices[(k + 1) % 3] == a && self.vertices[(k + 2) % 3] == b)
    }

    /// Slot that points back at `neighbor`.
    pub fn slot_of(&self, neighbor: FaceId) -> Option<usize> {
        self.opposite.iter().position(|&o| o == neighbor)
    }

    /// Directed edge opposite vertex slot `k`.
    #[inline]
    pub fn edge(&self, k: usize) -> (usize, usize) {
        (self.vertices[(k + 1) % 3], self.vertices[(k + 2) % 3])
    }
}

// =============================================================================
// FACE ARENA
// =============================================================================

/// Dense face storage keyed by [`FaceId`].
///
/// Identifiers are handed out monotonically and a removed slot is never
/// reused within one computation. `clear` resets the arena for the next
/// computation while keeping its allocation.
#[derive(Debug, Default)]
pub struct FaceArena {
    slots: Vec<Option<Face>>,
    live: usize,
}

impl FaceArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier the next inserted face will receive.
    #[inline]
    pub fn next_id(&self) -> FaceId {
        self.slots.len()
    }

    pub fn insert(&mut self, face: Face) -> FaceId {
        let id = self.slots.len();
        self.slots.push(Some(face));
        self.live += 1;
        id
    }

    pub fn remove(&mut self, id: FaceId) -> Option<Face> {
        let face = self.slots.get_mut(id)?.take();
        if face.is_some() {
            self.live -= 1;
        }
        face
    }

    #[inline]
    pub fn get(&self, id: FaceId) -> Option<&Face> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, id: FaceId) -> Option<&mut Face> {
        self.slots.get_mut(id).and_then(Option::as_mut)
    }

    /// Number of live faces.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Total faces created since the last `clear`.
    #[inline]
    pub fn created(&self) -> usize {
        self.slots.len()
    }

    /// Live faces in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (FaceId, &Face)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|face| (id, face)))
    }

    /// Removes every face, yielding them so their open sets can be recycled.
    pub fn drain(&mut self) -> impl Iterator<Item = Face> + '_ {
        self.live = 0;
        self.slots.drain(..).flatten()
    }
}

// =============================================================================
// OPEN SET POOL
// =============================================================================

/// Free list of open-set containers.
#[derive(Debug, Default)]
pub struct OpenSetPool {
    free: Vec<Vec<PointFace>>,
    lent: usize,
}

impl OpenSetPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out an empty container, reusing a returned one when possible.
    pub fn checkout(&mut self) -> Vec<PointFace> {
        self.lent += 1;
        match self.free.pop() {
            Some(mut set) => {
                set.clear();
                set
            }
            None => Vec::new(),
        }
    }

    pub fn give_back(&mut self, mut set: Vec<PointFace>) {
        self.lent = self.lent.saturating_sub(1);
        set.clear();
        self.free.push(set);
    }

    /// Containers currently owned by faces.
    #[inline]
    pub fn lent(&self) -> usize {
        self.lent
    }

    /// Containers waiting to be reused.
    #[cfg(test)]
    pub fn idle(&self) -> usize {
        self.free.len()
    }
}
