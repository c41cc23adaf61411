//! Event source abstraction for the ledger RPC client

use crate::{
    error::SourceError,
    types::NewBlockEvent,
};
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Stream of new-block events delivered by a live subscription
pub type EventStream = BoxStream<'static, NewBlockEvent>;

/// Trait for the ledger RPC capability the tracker consumes
///
/// Implementations wrap whatever event-stream protocol the ledger node
/// speaks (Tendermint websocket, gRPC, ...). The tracker treats events
/// opaquely except for extracting a height field. The capability is
/// injected explicitly at construction, never looked up from ambient
/// context.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Starts the underlying client connection
    async fn start(&self) -> Result<(), SourceError>;

    /// Returns true if the client connection is live
    fn is_running(&self) -> bool;

    /// Registers a subscription for events of `event_kind` matching `query`
    ///
    /// # Returns
    /// A stream of matching events, or an error if registration fails.
    async fn subscribe(
        &self,
        event_kind: &str,
        query: &str,
    ) -> Result<EventStream, SourceError>;

    /// Releases a previously registered subscription
    async fn unsubscribe(&self, event_kind: &str, query: &str) -> Result<(), SourceError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use futures::StreamExt;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::mpsc;
    use tokio_stream::wrappers::ReceiverStream;

    /// Mock event source for testing
    ///
    /// Scripted with a channel-backed event stream so tests can feed
    /// events after the tracker is constructed.
    pub struct MockEventSource {
        running: AtomicBool,
        start_error: Mutex<Option<SourceError>>,
        subscribe_error: Mutex<Option<SourceError>>,
        unsubscribe_error: Mutex<Option<SourceError>>,
        stream: Mutex<Option<mpsc::Receiver<NewBlockEvent>>>,
        start_calls: AtomicUsize,
        subscribe_calls: AtomicUsize,
        unsubscribe_calls: AtomicUsize,
    }

    impl MockEventSource {
        /// Creates a running mock with a channel-backed event stream
        ///
        /// # Returns
        /// The mock and the sender half used to feed it events.
        pub fn healthy() -> (Self, mpsc::Sender<NewBlockEvent>) {
            let (tx, rx) = mpsc::channel(16);
            let mock = Self {
                running: AtomicBool::new(true),
                start_error: Mutex::new(None),
                subscribe_error: Mutex::new(None),
                unsubscribe_error: Mutex::new(None),
                stream: Mutex::new(Some(rx)),
                start_calls: AtomicUsize::new(0),
                subscribe_calls: AtomicUsize::new(0),
                unsubscribe_calls: AtomicUsize::new(0),
            };
            (mock, tx)
        }

        /// Marks the client as not yet running
        pub fn set_stopped(&self) {
            self.running.store(false, Ordering::SeqCst);
        }

        /// Makes the next `start` call fail
        pub fn fail_start(&self, message: &str) {
            *self.start_error.lock().unwrap() = Some(SourceError::new(message));
        }

        /// Makes the next `subscribe` call fail
        pub fn fail_subscribe(&self, message: &str) {
            *self.subscribe_error.lock().unwrap() = Some(SourceError::new(message));
        }

        /// Makes `unsubscribe` calls fail
        pub fn fail_unsubscribe(&self, message: &str) {
            *self.unsubscribe_error.lock().unwrap() = Some(SourceError::new(message));
        }

        pub fn start_calls(&self) -> usize {
            self.start_calls.load(Ordering::SeqCst)
        }

        pub fn subscribe_calls(&self) -> usize {
            self.subscribe_calls.load(Ordering::SeqCst)
        }

        pub fn unsubscribe_calls(&self) -> usize {
            self.unsubscribe_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EventSource for MockEventSource {
        async fn start(&self) -> Result<(), SourceError> {
            self.start_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = self.start_error.lock().unwrap().take() {
                return Err(err);
            }
            self.running.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn is_running(&self) -> bool {
            self.running.load(Ordering::SeqCst)
        }

        async fn subscribe(
            &self,
            _event_kind: &str,
            _query: &str,
        ) -> Result<EventStream, SourceError> {
            self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = self.subscribe_error.lock().unwrap().take() {
                return Err(err);
            }
            let rx = self
                .stream
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| SourceError::new("subscription already taken"))?;
            Ok(ReceiverStream::new(rx).boxed())
        }

        async fn unsubscribe(&self, _event_kind: &str, _query: &str) -> Result<(), SourceError> {
            self.unsubscribe_calls.fetch_add(1, Ordering::SeqCst);
            match self.unsubscribe_error.lock().unwrap().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }
}
