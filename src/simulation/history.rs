//! Fixed-capacity, concurrency-safe history buffer.

use std::collections::VecDeque;
use std::sync::RwLock;

/// A FIFO sequence with a fixed maximum length.
///
/// Once full, appending evicts the oldest element before inserting the
/// newest, so `len() <= capacity()` always holds. Used for the engine's
/// frame history and for per-body trails consumed by renderers.
///
/// Stepping happens on a different thread than drawing, so the buffer is
/// guarded by a reader/writer lock: any number of readers may snapshot
/// concurrently, while an append briefly excludes them. Readers always
/// copy out of the lock, so a snapshot never changes after it is taken.
#[derive(Debug)]
pub struct BoundedHistory<T> {
    capacity: usize,
    items: RwLock<VecDeque<T>>,
}

impl<T: Clone> BoundedHistory<T> {
    /// Creates an empty history holding at most `capacity` elements.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            items: RwLock::new(VecDeque::with_capacity(capacity.max(1))),
        }
    }

    /// Maximum number of elements retained.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of elements currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Appends an element, evicting the oldest one if at capacity.
    pub fn add(&self, item: T) {
        let mut items = self
            .items
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if items.len() == self.capacity {
            items.pop_front();
        }
        items.push_back(item);
    }

    /// Removes all elements.
    pub fn clear(&self) {
        self.items
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clear();
    }

    /// The most recently appended element.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.read().back().cloned()
    }

    /// The oldest retained element.
    #[must_use]
    pub fn oldest(&self) -> Option<T> {
        self.read().front().cloned()
    }

    /// Copies out all retained elements, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.read().iter().cloned().collect()
    }

    /// Copies out the newest `n` elements, oldest of them first.
    #[must_use]
    pub fn tail(&self, n: usize) -> Vec<T> {
        let items = self.read();
        let skip = items.len().saturating_sub(n);
        items.iter().skip(skip).cloned().collect()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, VecDeque<T>> {
        // A poisoned lock only means a panic elsewhere while appending;
        // the deque itself is still structurally sound.
        self.items
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
