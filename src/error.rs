//! Error types for the chain height tracker

use crate::types::Height;
use thiserror::Error;

/// Opaque failure reported by the ledger RPC client
///
/// The tracker does not interpret the client's transport errors; it wraps
/// whatever the client reports into the variant matching the call that
/// failed.
#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct SourceError {
    message: String,
}

impl SourceError {
    /// Creates a source error from any message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that are fatal to tracker construction
///
/// None of these produce a tracker: no background task is spawned and no
/// subscription is left behind.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Initial height must be at least 1
    #[error("expected positive initial block height, got {0}")]
    InvalidInitialHeight(Height),

    /// The RPC client was not running and failed to start
    #[error("event source failed to start")]
    Connection(#[source] SourceError),

    /// The initial subscribe call failed
    #[error("failed to subscribe to {query}")]
    Subscription {
        query: String,
        #[source]
        source: SourceError,
    },
}

/// Errors recorded in the cached state during the subscription's life
///
/// These are non-fatal to the loop and are surfaced to readers alongside
/// the last good height. `Clone` because the snapshot carries them.
#[derive(Debug, Error, Clone)]
pub enum FeedError {
    /// Event payload lacked the expected new-block-header shape
    #[error("malformed new-block event: {0}")]
    Parse(String),

    /// Cleanup unsubscribe failed at shutdown
    #[error("failed to unsubscribe on shutdown: {0}")]
    Unsubscribe(String),

    /// The event stream ended without an explicit cancellation
    #[error("event stream closed unexpectedly")]
    StreamClosed,
}

impl FeedError {
    /// Creates a Parse error
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse(reason.into())
    }

    /// Creates an Unsubscribe error
    pub fn unsubscribe(reason: impl Into<String>) -> Self {
        Self::Unsubscribe(reason.into())
    }
}
