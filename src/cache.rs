//! Concurrency-safe cache for the last known chain height

use crate::{
    error::FeedError,
    types::{Height, HeightSnapshot},
};
use std::sync::RwLock;

/// Holds the last known height and last feed error
///
/// The only shared state between a tracker and its subscription loop.
/// Critical sections are O(1), so readers are never blocked by network
/// latency; the subscription loop is the sole writer.
pub struct HeightCache {
    inner: RwLock<HeightSnapshot>,
}

impl HeightCache {
    /// Creates a cache seeded with the given height and no error
    pub fn new(initial_height: Height) -> Self {
        Self {
            inner: RwLock::new(HeightSnapshot {
                height: initial_height,
                error: None,
            }),
        }
    }

    /// Records a new height and clears any flagged error
    pub fn update(&self, height: Height) {
        let mut state = self.inner.write().unwrap();
        state.height = height;
        state.error = None;
    }

    /// Flags a feed error, retaining the last known-good height
    pub fn record_error(&self, error: FeedError) {
        let mut state = self.inner.write().unwrap();
        state.error = Some(error);
    }

    /// Returns the current snapshot
    ///
    /// Non-blocking beyond the lock itself; never performs I/O. Safe for
    /// unbounded concurrent callers.
    pub fn snapshot(&self) -> HeightSnapshot {
        self.inner.read().unwrap().clone()
    }
}
