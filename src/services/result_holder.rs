//! Latest-result slot shared between a service and its in-flight tasks.

use parking_lot::RwLock;
use std::sync::Arc;

/// Holds the most recently decoded result
///
/// Writers replace the whole value; readers get a cheap `Arc` snapshot.
/// Concurrent tasks race and the last replacement wins.
pub struct ResultHolder<R> {
    slot: Arc<RwLock<Arc<R>>>,
}

impl<R> Clone for ResultHolder<R> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<R: Default> Default for ResultHolder<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<R> ResultHolder<R> {
    pub fn new(initial: R) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Arc::new(initial))),
        }
    }

    pub fn current(&self) -> Arc<R> {
        self.slot.read().clone()
    }

    pub fn replace(&self, value: R) {
        *self.slot.write() = Arc::new(value);
    }
}

impl<R: std::fmt::Debug> std::fmt::Debug for ResultHolder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultHolder")
            .field("current", &self.current())
            .finish()
    }
}
