//! # Hull Builder
//!
//! Incremental QuickHull over a face arena with explicit adjacency.
//!
//! ## Algorithm Steps
//!
//! 1. Build a seed tetrahedron and classify every other point into the open
//!    set of the first face it lies outside of
//! 2. While any open set is non-empty:
//!    a. Pick the farthest assigned point across the whole hull (the apex)
//!    b. Flood-fill the faces it sees and collect the horizon loop
//!    c. Delete the lit faces and close the hole with a cone to the apex
//!    d. Reassign orphaned points to the new cone faces only
//! 3. Export the surviving faces as a flat triangle soup
//!
//! All mutable state lives in [`HullBuilder`], so one builder can be reused
//! for many computations without reallocating.

mod cone;
pub(crate) mod face;
mod horizon;
mod simplex;
mod verify;


use std::collections::HashSet;

use config::constants::{MAX_VERTICES, MIN_HULL_POINTS};
use glam::DVec3;

use crate::config::HullConfig;
use crate::error::{HullError, HullResult};
use crate::geometry::cloud_extent;
use crate::mesh::HullMesh;
use face::{FaceArena, FaceId, OpenSetPool};
use horizon::{HorizonEdge, SearchFrame};

/// Phase of the growth loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthState {
    /// At least one point is still outside the hull.
    Growing,
    /// Every point is enclosed.
    Done,
}

/// Counters from the most recent computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HullStats {
    /// Growth iterations (one per apex).
    pub iterations: usize,
    /// Faces created, including those later deleted.
    pub faces_created: usize,
    /// Faces on the final hull.
    pub hull_faces: usize,
}

/// Reusable convex hull builder.
///
/// # Example
///
/// ```rust
/// use convex_hull::{HullBuilder, HullConfig, HullMesh};
/// use glam::DVec3;
///
/// let points = vec![
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 1.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
///     DVec3::new(0.1, 0.1, 0.1),
/// ];
///
/// let mut builder = HullBuilder::new(HullConfig::default());
/// let mut mesh = HullMesh::new();
/// builder.build_into(&points, &mut mesh).unwrap();
/// assert_eq!(mesh.triangle_count(), 4);
/// ```
#[derive(Debug)]
pub struct HullBuilder {
    config: HullConfig,
    faces: FaceArena,
    open_sets: OpenSetPool,
    lit: HashSet<FaceId>,
    lit_order: Vec<FaceId>,
    horizon: Vec<HorizonEdge>,
    stack: Vec<SearchFrame>,
    added: Vec<FaceId>,
    pending: Vec<usize>,
    assigned: usize,
    scale: f64,
    tolerance: f64,
    stats: HullStats,
}

impl Default for HullBuilder {
    fn default() -> Self {
        Self::new(HullConfig::default())
    }
}

impl HullBuilder {
    /// Creates a builder with the given configuration.
    pub fn new(config: HullConfig) -> Self {
        Self {
            config,
            faces: FaceArena::new(),
            open_sets: OpenSetPool::new(),
            lit: HashSet::new(),
            lit_order: Vec::new(),
            horizon: Vec::new(),
            stack: Vec::new(),
            added: Vec::new(),
            pending: Vec::new(),
            assigned: 0,
            scale: 1.0,
            tolerance: config.epsilon,
            stats: HullStats::default(),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HullConfig {
        &self.config
    }

    /// Counters from the most recent computation.
    pub fn stats(&self) -> HullStats {
        self.stats
    }

    /// Outside-of-face distance used by the most recent computation:
    /// [`HullConfig::epsilon`] times the largest axis span of its input.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Computes the hull of `points` into a freshly allocated mesh.
    pub fn build(&mut self, points: &[DVec3]) -> HullResult<HullMesh> {
        let mut mesh = HullMesh::new();
        self.build_into(points, &mut mesh)?;
        Ok(mesh)
    }

    /// Computes the hull of `points`, clearing and refilling `out`.
    ///
    /// `points` must not change while the computation runs; `out` is only
    /// meaningful once this returns `Ok`.
    pub fn build_into(&mut self, points: &[DVec3], out: &mut HullMesh) -> HullResult<()> {
        out.clear();
        if points.len() < MIN_HULL_POINTS {
            return Err(HullError::InsufficientPoints {
                count: points.len(),
            });
        }

        self.reset();
        self.scale = unit_scale(points);
        self.tolerance = self.config.epsilon * self.scale;
        log::debug!(
            "Building convex hull of {} points (tolerance {:e})",
            points.len(),
            self.tolerance
        );

        let outcome = self
            .construct(points)
            .and_then(|()| self.export(points, out));

        self.stats.faces_created = self.faces.created();
        self.stats.hull_faces = self.faces.len();
        self.release_faces();

        if let Err(err) = outcome {
            out.clear();
            return Err(err);
        }

        if self.config.verify {
            verify::check_pool_returned(&self.open_sets)?;
            verify::check_containment(points, out, self.tolerance)?;
        }

        log::debug!(
            "Convex hull done: {} faces after {} iterations ({} faces created)",
            self.stats.hull_faces,
            self.stats.iterations,
            self.stats.faces_created
        );
        Ok(())
    }

    /// Current phase of the growth loop.
    pub fn state(&self) -> GrowthState {
        if self.assigned > 0 {
            GrowthState::Growing
        } else {
            GrowthState::Done
        }
    }

    // =========================================================================
    // PIPELINE
    // =========================================================================

    fn construct(&mut self, points: &[DVec3]) -> HullResult<()> {
        let seed = simplex::select_seed(points, self.config.seed)?;
        simplex::check_seed(points, seed, self.tolerance, self.scale)?;
        self.build_simplex(points, seed);

        if self.config.verify {
            verify::check_faces(&self.faces, points, self.config.epsilon)?;
            verify::check_open_sets(&self.faces, self.assigned, self.tolerance)?;
        }

        while self.state() == GrowthState::Growing {
            self.grow(points)?;
        }
        Ok(())
    }

    /// One growth iteration: apex, horizon, cone, reassignment.
    fn grow(&mut self, points: &[DVec3]) -> HullResult<()> {
        let (apex, seed_face) = self.select_apex().ok_or_else(|| {
            HullError::topology(format!(
                "{} points assigned but every open set is empty",
                self.assigned
            ))
        })?;

        self.find_horizon(points, apex, seed_face)?;
        if self.config.verify {
            verify::check_horizon(&self.horizon, &self.faces)?;
        }

        self.construct_cone(points, apex)?;
        if self.config.verify {
            verify::check_faces(&self.faces, points, self.config.epsilon)?;
        }

        self.reassign_points(points, apex);
        if self.config.verify {
            verify::check_open_sets(&self.faces, self.assigned, self.tolerance)?;
        }

        self.stats.iterations += 1;
        log::trace!(
            "Grew hull to point {}: {} lit faces, {} horizon edges, {} points outside",
            apex,
            self.lit_order.len(),
            self.horizon.len(),
            self.assigned
        );
        Ok(())
    }

    /// Farthest assigned point over every open set and the face it was
    /// measured from. Equal distances go to the lowest point index.
    fn select_apex(&self) -> Option<(usize, FaceId)> {
        let mut best: Option<(usize, FaceId, f64)> = None;
        for (id, face) in self.faces.iter() {
            for pf in &face.open_set {
                let better = match best {
                    None => true,
                    Some((point, _, distance)) => {
                        pf.distance > distance || (pf.distance == distance && pf.point < point)
                    }
                };
                if better {
                    best = Some((pf.point, id, pf.distance));
                }
            }
        }
        best.map(|(point, id, _)| (point, id))
    }

    /// Flattens the live faces into `out`.
    fn export(&self, points: &[DVec3], out: &mut HullMesh) -> HullResult<()> {
        let count = self.faces.len() * 3;
        if count > MAX_VERTICES {
            return Err(HullError::TooManyVertices {
                count,
                max: MAX_VERTICES,
            });
        }

        out.clear();
        out.reserve(self.faces.len());
        for (_, face) in self.faces.iter() {
            let [a, b, c] = face.vertices;
            out.push_face([points[a], points[b], points[c]], face.normal);
        }
        Ok(())
    }

    // =========================================================================
    // STATE MANAGEMENT
    // =========================================================================

    fn reset(&mut self) {
        self.release_faces();
        self.lit.clear();
        self.lit_order.clear();
        self.horizon.clear();
        self.stack.clear();
        self.added.clear();
        self.pending.clear();
        self.assigned = 0;
        self.stats = HullStats::default();
    }

    /// Returns every live face's open set to the pool and empties the arena.
    fn release_faces(&mut self) {
        for face in self.faces.drain() {
            self.open_sets.give_back(face.open_set);
        }
        self.assigned = 0;
    }
}

/// Length unit of a cloud: its largest axis span, or 1 when the cloud has
/// no extent.
fn unit_scale(points: &[DVec3]) -> f64 {
    let extent = cloud_extent(points);
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        1.0
    }
}
