//! # Object Pool
//!
//! Thread-safe reuse of expensive instances such as [`HullBuilder`]s and
//! [`HullMesh`] buffers across repeated or concurrent computations.
//!
//! [`HullBuilder`]: crate::HullBuilder
//! [`HullMesh`]: crate::HullMesh

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;

/// A pool that hands out idle instances or creates new ones on demand.
///
/// # Example
///
/// ```rust
/// use convex_hull::{HullBuilder, ObjectPool};
///
/// let pool = ObjectPool::new(HullBuilder::default);
/// let builder = pool.take_out();
/// assert_eq!(pool.borrowed(), 1);
/// pool.put_back(builder);
/// assert_eq!(pool.idle(), 1);
/// ```
pub struct ObjectPool<T> {
    factory: Factory<T>,
    idle: Mutex<Vec<T>>,
    borrowed: AtomicUsize,
}

impl<T> ObjectPool<T> {
    /// Creates an empty pool; instances are built lazily with `factory`.
    pub fn new(factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            idle: Mutex::new(Vec::new()),
            borrowed: AtomicUsize::new(0),
        }
    }

    /// Pops an idle instance, or creates one if none is waiting.
    pub fn take_out(&self) -> T {
        self.borrowed.fetch_add(1, Ordering::Relaxed);
        let reused = self.idle_list().pop();
        reused.unwrap_or_else(|| (self.factory)())
    }

    /// Returns an instance for later reuse.
    pub fn put_back(&self, value: T) {
        self.idle_list().push(value);
        // saturating: values created outside the pool may be put back too
        let _ = self
            .borrowed
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
    }

    /// Runs `f` with a pooled instance and returns it afterwards.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut value = self.take_out();
        let result = f(&mut value);
        self.put_back(value);
        result
    }

    /// Instances currently taken out.
    pub fn borrowed(&self) -> usize {
        self.borrowed.load(Ordering::Relaxed)
    }

    /// Instances waiting in the pool.
    pub fn idle(&self) -> usize {
        self.idle_list().len()
    }

    fn idle_list(&self) -> MutexGuard<'_, Vec<T>> {
        // the list stays consistent even if a holder panicked
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> fmt::Debug for ObjectPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectPool")
            .field("idle", &self.idle())
            .field("borrowed", &self.borrowed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_take_out_creates_then_reuses() {
        let created = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&created);
        let pool = ObjectPool::new(move || {
            counter.fetch_add(1, Ordering::Relaxed);
            Vec::<u8>::with_capacity(16)
        });

        let a = pool.take_out();
        let b = pool.take_out();
        assert_eq!(created.load(Ordering::Relaxed), 2);
        assert_eq!(pool.borrowed(), 2);

        pool.put_back(a);
        pool.put_back(b);
        assert_eq!(pool.borrowed(), 0);
        assert_eq!(pool.idle(), 2);

        let _c = pool.take_out();
        assert_eq!(created.load(Ordering::Relaxed), 2);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_with_returns_instance() {
        let pool = ObjectPool::new(Vec::<u32>::new);
        let len = pool.with(|v| {
            v.push(7);
            v.len()
        });
        assert_eq!(len, 1);
        assert_eq!(pool.borrowed(), 0);
        assert_eq!(pool.idle(), 1);
        assert_eq!(pool.take_out(), vec![7]);
    }

    #[test]
    fn test_put_back_foreign_value() {
        let pool = ObjectPool::new(String::new);
        pool.put_back("external".to_string());
        assert_eq!(pool.borrowed(), 0);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_shared_across_threads() {
        let pool = Arc::new(ObjectPool::new(Vec::<usize>::new));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let pool = Arc::clone(&pool);
                std::thread::spawn(move || pool.with(|v| v.push(i)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(pool.borrowed(), 0);
        assert!(pool.idle() >= 1 && pool.idle() <= 4);
    }
}
