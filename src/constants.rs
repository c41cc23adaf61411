//! Constants for the chain height tracker
//!
//! The tracker itself takes no runtime configuration beyond its
//! constructor arguments; the tunables live here as compile-time
//! constants.

use crate::types::Height;

/// Event kind the tracker subscribes to
pub const EVENT_NEW_BLOCK_HEADER: &str = "NewBlockHeader";

/// Subscription query filter matching new-block-header events
pub const QUERY_NEW_BLOCK_HEADER: &str = "tm.event='NewBlockHeader'";

/// Smallest initial height accepted by the constructor
pub const MIN_INITIAL_HEIGHT: Height = 1;
