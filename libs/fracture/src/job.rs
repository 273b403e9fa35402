//! # Background Hull Job
//!
//! Runs one hull computation on the rayon thread pool. The caller polls or
//! blocks for the finished mesh and never observes partial buffers.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use convex_hull::{HullBuilder, HullConfig, HullMesh, HullResult, ObjectPool};
use glam::DVec3;

use crate::error::{FractureError, FractureResult};

/// Handle to a hull computation running in the background.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use convex_hull::HullConfig;
/// use fracture::HullJob;
/// use glam::DVec3;
///
/// let points: Arc<[DVec3]> = Arc::from(vec![
///     DVec3::ZERO,
///     DVec3::X,
///     DVec3::Y,
///     DVec3::Z,
/// ]);
/// let job = HullJob::spawn(points, HullConfig::default());
/// let mesh = job.wait().unwrap();
/// assert_eq!(mesh.triangle_count(), 4);
/// ```
#[derive(Debug)]
pub struct HullJob {
    receiver: Receiver<HullResult<HullMesh>>,
}

impl HullJob {
    /// Starts computing the hull of `points` with a fresh builder.
    pub fn spawn(points: Arc<[DVec3]>, config: HullConfig) -> Self {
        let (sender, receiver) = mpsc::channel();
        rayon::spawn(move || {
            let result = HullBuilder::new(config).build(&points);
            // the handle may already be gone
            let _ = sender.send(result);
        });
        Self { receiver }
    }

    /// Starts computing the hull of `points` with a builder from `pool`.
    pub fn spawn_pooled(points: Arc<[DVec3]>, pool: Arc<ObjectPool<HullBuilder>>) -> Self {
        let (sender, receiver) = mpsc::channel();
        rayon::spawn(move || {
            let result = pool.with(|builder| builder.build(&points));
            let _ = sender.send(result);
        });
        Self { receiver }
    }

    /// Returns the result if the computation has finished, or the handle
    /// back if it is still running.
    pub fn try_take(self) -> Result<FractureResult<HullMesh>, Self> {
        match self.receiver.try_recv() {
            Ok(result) => Ok(result.map_err(FractureError::from)),
            Err(TryRecvError::Empty) => Err(self),
            Err(TryRecvError::Disconnected) => Ok(Err(FractureError::JobLost)),
        }
    }

    /// Blocks until the computation finishes.
    pub fn wait(self) -> FractureResult<HullMesh> {
        match self.receiver.recv() {
            Ok(result) => Ok(result?),
            Err(_) => Err(FractureError::JobLost),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> Arc<[DVec3]> {
        let points: Vec<DVec3> = (0..8)
            .map(|i| DVec3::new((i & 1) as f64, ((i >> 1) & 1) as f64, ((i >> 2) & 1) as f64))
            .collect();
        Arc::from(points)
    }

    #[test]
    fn test_wait_returns_mesh() {
        let config = HullConfig::default().with_seed(convex_hull::SeedStrategy::Extremal);
        let mesh = HullJob::spawn(cube(), config).wait().unwrap();
        assert_eq!(mesh.triangle_count(), 12);
        assert!((mesh.volume() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_try_take_polls_until_done() {
        let config = HullConfig::default().with_seed(convex_hull::SeedStrategy::Extremal);
        let mut job = HullJob::spawn(cube(), config);
        let result = loop {
            match job.try_take() {
                Ok(result) => break result,
                Err(pending) => {
                    job = pending;
                    std::thread::yield_now();
                }
            }
        };
        assert_eq!(result.unwrap().triangle_count(), 12);
    }

    #[test]
    fn test_errors_are_forwarded() {
        let points: Arc<[DVec3]> = Arc::from(vec![DVec3::ZERO; 3]);
        let err = HullJob::spawn(points, HullConfig::default()).wait().unwrap_err();
        assert!(matches!(err, FractureError::Hull(_)));
    }

    #[test]
    fn test_pooled_builders_return() {
        let pool = Arc::new(ObjectPool::new(|| {
            HullBuilder::new(HullConfig::default().with_seed(convex_hull::SeedStrategy::Extremal))
        }));
        let jobs: Vec<_> = (0..4)
            .map(|_| HullJob::spawn_pooled(cube(), Arc::clone(&pool)))
            .collect();
        for job in jobs {
            assert_eq!(job.wait().unwrap().triangle_count(), 12);
        }
        assert_eq!(pool.borrowed(), 0);
        assert!(pool.idle() >= 1);
    }
}
