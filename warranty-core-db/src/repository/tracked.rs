use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

/// Shared handle to an entity staged in a unit of work.
///
/// The unit of work publishes the persisted version of the entity into the
/// handle once the save that wrote it succeeds; until then the handle holds
/// the entity as it was staged.
#[derive(Debug)]
pub struct Tracked<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Clone for Tracked<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> Tracked<T> {
    pub fn new(entity: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(entity)),
        }
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> T {
        self.inner.read().clone()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.inner.read()
    }

    /// Replaces the held entity with its persisted version
    pub fn publish(&self, entity: T) {
        *self.inner.write() = entity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_is_visible_through_clones() {
        let tracked = Tracked::new(1_i64);
        let other = tracked.clone();

        tracked.publish(42);

        assert_eq!(other.snapshot(), 42);
        assert_eq!(*other.read(), 42);
    }
}
