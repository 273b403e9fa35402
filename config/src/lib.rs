//! # Config Crate
//!
//! Centralized configuration constants for the convex hull workspace.
//! All tolerances, limits and tunable parameters are defined here so the
//! hull builder and its consumers agree on the same numbers.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{HULL_EPSILON, MIN_HULL_POINTS};
//!
//! // A point counts as outside a face only beyond HULL_EPSILON
//! let distance = 5.0e-5;
//! assert!(distance <= HULL_EPSILON);
//!
//! // A hull needs a tetrahedron to start from
//! assert_eq!(MIN_HULL_POINTS, 4);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **One Tolerance**: Every outside-of-face test shares `HULL_EPSILON`
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
