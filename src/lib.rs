//! # Chain Height Tracker SDK
//!
//! Maintains a continuously updated view of the latest block height of a
//! remote distributed ledger, fed by a push-based event subscription.
//! Callers gate or time operations against ledger progress (staleness
//! detection, submission scheduling) without ever blocking on network I/O.
//!
//! ## Usage
//!
//! The ledger RPC capability is injected explicitly; one tracker is
//! constructed per monitored ledger:
//!
//! ```no_run
//! use chain_height_sdk::{ChainHeightTracker, EventSource};
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example(rpc: Arc<dyn EventSource>) -> Result<(), Box<dyn std::error::Error>> {
//! let cancel = CancellationToken::new();
//! let tracker = ChainHeightTracker::new(cancel.clone(), rpc, 100).await?;
//!
//! // Non-blocking read, safe from any number of tasks.
//! let (height, error) = tracker.height();
//! if let Some(err) = error {
//!     eprintln!("feed degraded at height {height}: {err}");
//! }
//!
//! // Cooperative shutdown; the cached height stays readable.
//! cancel.cancel();
//! # Ok(())
//! # }
//! ```
//!
//! The tracker records whatever the last well-formed event carried and
//! never drops the last known-good height: a malformed event or a failed
//! shutdown unsubscribe is flagged beside the height, not in place of it.

pub mod cache;
pub mod constants;
pub mod error;
pub mod event_source;
mod subscription;
pub mod tracker;
pub mod types;

// Re-export commonly used types
pub use error::{FeedError, SourceError, TrackerError};
pub use event_source::{EventSource, EventStream};
pub use tracker::ChainHeightTracker;
pub use types::{Height, HeightSnapshot, HealthStatus, NewBlockEvent, TrackerHealth};
