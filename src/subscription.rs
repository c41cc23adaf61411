//! Background subscription loop feeding the height cache

use crate::{
    cache::HeightCache,
    constants::{EVENT_NEW_BLOCK_HEADER, QUERY_NEW_BLOCK_HEADER},
    error::FeedError,
    event_source::{EventSource, EventStream},
    types::NewBlockEvent,
};
use futures::StreamExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Long-lived task consuming new-block events and updating the cache
///
/// Exactly one loop runs per tracker instance. It owns the subscription
/// stream exclusively and is the cache's sole writer. The loop suspends
/// cooperatively on a select between the next event and the cancellation
/// signal; there is no timeout on the wait, liveness is delegated to the
/// ledger.
pub(crate) struct SubscriptionLoop {
    cache: Arc<HeightCache>,
    source: Arc<dyn EventSource>,
    stream: EventStream,
    cancel: CancellationToken,
}

impl SubscriptionLoop {
    pub(crate) fn new(
        cache: Arc<HeightCache>,
        source: Arc<dyn EventSource>,
        stream: EventStream,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            cache,
            source,
            stream,
            cancel,
        }
    }

    /// Runs until cancelled or the stream closes
    pub(crate) async fn run(mut self) {
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    Self::shutdown(&self.source, &self.cache).await;
                    return;
                }

                maybe_event = self.stream.next() => {
                    match maybe_event {
                        Some(event) => self.handle_event(event),
                        None => {
                            // Transport dropped the stream without an explicit
                            // cancellation. No reconnect is attempted; the
                            // degraded state is flagged so readers can tell
                            // a dead feed from an idle ledger.
                            error!(
                                component = "chain_height",
                                "event stream closed unexpectedly"
                            );
                            self.cache.record_error(FeedError::StreamClosed);
                            return;
                        }
                    }
                }
            }
        }
    }

    fn handle_event(&self, event: NewBlockEvent) {
        match event.height() {
            Ok(height) => {
                debug!(component = "chain_height", height, "new block header");
                self.cache.update(height);
            }
            Err(err) => {
                error!(component = "chain_height", error = %err, "dropping malformed event");
                self.cache.record_error(err);
            }
        }
    }

    /// Best-effort unsubscribe on the cancellation exit path
    ///
    /// Issued unconditionally even though the token has already fired; the
    /// call must not be gated on the expired scope or a healthy transport
    /// could never unwind the registration. Failure is recorded with the
    /// height untouched. Takes the fields it needs rather than `&self`:
    /// the loop (via its non-`Sync` event stream) must not be borrowed
    /// across this await or the spawned future stops being `Send`.
    async fn shutdown(source: &Arc<dyn EventSource>, cache: &HeightCache) {
        if let Err(err) = source
            .unsubscribe(EVENT_NEW_BLOCK_HEADER, QUERY_NEW_BLOCK_HEADER)
            .await
        {
            error!(component = "chain_height", error = %err, "unsubscribe failed");
            cache.record_error(FeedError::unsubscribe(err.to_string()));
        }
        info!(component = "chain_height", "closing the chain height subscription");
    }
}
