//! Chain height tracker facade
//!
//! Caches the latest block height of a remote ledger, updated by a
//! push-based event subscription.

use crate::{
    cache::HeightCache,
    constants::{EVENT_NEW_BLOCK_HEADER, MIN_INITIAL_HEIGHT, QUERY_NEW_BLOCK_HEADER},
    error::{FeedError, TrackerError},
    event_source::EventSource,
    subscription::SubscriptionLoop,
    types::{Height, HealthStatus, TrackerHealth},
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Tracks the latest chain height of a remote ledger
///
/// Construction registers a new-block-header subscription on the injected
/// event source and spawns one background task that keeps the cached
/// height current. Readers call [`height`](Self::height) without ever
/// touching the network. A process may run many independent trackers, one
/// per monitored ledger; instances share no state.
///
/// # Example
/// ```no_run
/// use chain_height_sdk::{ChainHeightTracker, EventSource};
/// use std::sync::Arc;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example(rpc: Arc<dyn EventSource>) -> Result<(), Box<dyn std::error::Error>> {
/// let cancel = CancellationToken::new();
/// let tracker = ChainHeightTracker::new(cancel.clone(), rpc, 100).await?;
///
/// let (height, error) = tracker.height();
/// println!("chain height: {height} (degraded: {})", error.is_some());
/// # Ok(())
/// # }
/// ```
pub struct ChainHeightTracker {
    cache: Arc<HeightCache>,
    task: JoinHandle<()>,
}

impl ChainHeightTracker {
    /// Creates a tracker and starts its subscription loop
    ///
    /// Starts the event source if it is not already running, registers the
    /// new-block-header subscription, seeds the cache with
    /// `initial_height`, and spawns the loop. Returns immediately; the
    /// constructor does not wait for the first event.
    ///
    /// # Errors
    /// * [`TrackerError::InvalidInitialHeight`] if `initial_height` is
    ///   below 1 — nothing is started and no subscribe call is made.
    /// * [`TrackerError::Connection`] if the source is not running and
    ///   fails to start.
    /// * [`TrackerError::Subscription`] if the subscribe call fails.
    pub async fn new(
        cancel: CancellationToken,
        source: Arc<dyn EventSource>,
        initial_height: Height,
    ) -> Result<Self, TrackerError> {
        if initial_height < MIN_INITIAL_HEIGHT {
            return Err(TrackerError::InvalidInitialHeight(initial_height));
        }

        if !source.is_running() {
            source.start().await.map_err(TrackerError::Connection)?;
        }

        let stream = source
            .subscribe(EVENT_NEW_BLOCK_HEADER, QUERY_NEW_BLOCK_HEADER)
            .await
            .map_err(|source| TrackerError::Subscription {
                query: QUERY_NEW_BLOCK_HEADER.to_string(),
                source,
            })?;

        let cache = Arc::new(HeightCache::new(initial_height));
        let task = tokio::spawn(
            SubscriptionLoop::new(cache.clone(), source, stream, cancel).run(),
        );

        info!(
            component = "chain_height",
            initial_height, "chain height subscription started"
        );

        Ok(Self { cache, task })
    }

    /// Returns the last known height and any flagged feed error
    ///
    /// Non-blocking snapshot read; never performs network I/O. An error
    /// here means the feed is degraded, not that the height is lost — the
    /// last known-good value is always returned beside it.
    pub fn height(&self) -> (Height, Option<FeedError>) {
        let snap = self.cache.snapshot();
        (snap.height, snap.error)
    }

    /// Returns true once the subscription loop has exited
    ///
    /// The cache remains readable after the loop stops.
    pub fn is_stopped(&self) -> bool {
        self.task.is_finished()
    }

    /// Reports the tracker's health from the current snapshot
    ///
    /// Pure function of the cached state, no I/O. Degraded whenever a feed
    /// error is flagged; staleness of a Healthy tracker must be judged by
    /// the caller against elapsed time.
    pub fn health_check(&self) -> TrackerHealth {
        let snap = self.cache.snapshot();
        match snap.error {
            Some(err) => TrackerHealth {
                status: HealthStatus::Degraded,
                height: snap.height,
                message: Some(err.to_string()),
            },
            None => TrackerHealth {
                status: HealthStatus::Healthy,
                height: snap.height,
                message: None,
            },
        }
    }
}
