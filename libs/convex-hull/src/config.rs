//! Hull-level configuration building on the shared `config` crate.
//!
//! The builder never reads literal tolerances; it receives a [`HullConfig`]
//! whose epsilon is validated by [`GlobalConfig`].

use crate::error::HullResult;
use config::constants::{GlobalConfig, HULL_EPSILON};
use serde::{Deserialize, Serialize};

/// How the four seed vertices of the initial tetrahedron are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeedStrategy {
    /// Use input points `0, 1, 2, 3`. A flat seed fails with
    /// [`HullError::DegenerateSeed`](crate::HullError::DegenerateSeed).
    #[default]
    FirstFour,
    /// Search axis-extreme points for a well-spread tetrahedron.
    Extremal,
}

/// Hull builder configuration.
///
/// # Examples
/// ```
/// use convex_hull::{HullConfig, SeedStrategy};
/// let cfg = HullConfig::new(1.0e-6)
///     .unwrap()
///     .with_seed(SeedStrategy::Extremal)
///     .with_verify(true);
/// assert_eq!(cfg.epsilon, 1.0e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullConfig {
    /// Distance a point must exceed to count as outside a face, per unit of
    /// input extent. The builder multiplies it by the largest axis span of
    /// each cloud.
    pub epsilon: f64,
    /// Seed selection for the initial tetrahedron.
    pub seed: SeedStrategy,
    /// Run the topology verifier after every mutation.
    pub verify: bool,
}

impl HullConfig {
    /// Creates a configuration with an explicit tolerance.
    pub fn new(epsilon: f64) -> HullResult<Self> {
        let global = GlobalConfig::new(epsilon, 1)?;
        Ok(Self {
            epsilon: global.tolerance,
            ..Self::default()
        })
    }

    /// Creates a configuration from the workspace-wide settings.
    pub fn from_global(global: &GlobalConfig) -> Self {
        Self {
            epsilon: global.tolerance,
            ..Self::default()
        }
    }

    /// Sets the seed strategy.
    pub fn with_seed(mut self, seed: SeedStrategy) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables topology verification.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            epsilon: HULL_EPSILON,
            seed: SeedStrategy::FirstFour,
            verify: cfg!(debug_assertions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HullError;

    #[test]
    fn test_default_uses_shared_epsilon() {
        let cfg = HullConfig::default();
        assert_eq!(cfg.epsilon, HULL_EPSILON);
        assert_eq!(cfg.seed, SeedStrategy::FirstFour);
        assert_eq!(cfg.verify, cfg!(debug_assertions));
    }

    #[test]
    fn test_new_rejects_bad_tolerance() {
        assert!(matches!(
            HullConfig::new(0.0),
            Err(HullError::InvalidConfig(_))
        ));
        assert!(HullConfig::new(-1.0).is_err());
    }

    #[test]
    fn test_from_global() {
        let global = GlobalConfig::new(0.5, 10).unwrap();
        let cfg = HullConfig::from_global(&global);
        assert_eq!(cfg.epsilon, 0.5);
    }
}
