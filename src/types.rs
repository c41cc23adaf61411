//! Types for the chain height tracker

use crate::error::FeedError;
use serde::Deserialize;
use serde_json::Value;

/// Block sequence number on the ledger
pub type Height = u64;

/// A new-block event pushed by the ledger RPC client
///
/// The payload is carried opaquely; the tracker only ever extracts the
/// height field from it. Tendermint-style feeds encode the header height
/// as a decimal string, other feeds use a plain integer; both are accepted.
#[derive(Debug, Clone)]
pub struct NewBlockEvent {
    /// Raw event payload as delivered by the RPC client
    pub data: Value,
}

/// Expected shape of the payload: `{"header": {"height": ...}}`
#[derive(Debug, Deserialize)]
struct NewBlockHeaderData {
    header: BlockHeader,
}

#[derive(Debug, Deserialize)]
struct BlockHeader {
    height: RawHeight,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawHeight {
    Number(u64),
    Text(String),
}

impl NewBlockEvent {
    /// Wraps a raw event payload
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Extracts the block height from the event payload
    ///
    /// # Returns
    /// The height carried by the event, or a `FeedError::Parse` if the
    /// payload does not have the expected new-block-header shape.
    pub fn height(&self) -> Result<Height, FeedError> {
        // Deserialize by reference; this runs once per event, no need to
        // clone the whole payload to read one field.
        let parsed = NewBlockHeaderData::deserialize(&self.data)
            .map_err(|e| FeedError::parse(e.to_string()))?;

        match parsed.header.height {
            RawHeight::Number(h) => Ok(h),
            RawHeight::Text(s) => s
                .parse::<Height>()
                .map_err(|e| FeedError::parse(format!("invalid height {:?}: {}", s, e))),
        }
    }
}

/// Snapshot of the tracker's cached state
///
/// Invariant: an error never clears or rolls back `height`. The last
/// known-good height stays readable while an error is flagged, so a
/// degraded feed remains usable with stale-but-known data.
#[derive(Debug, Clone)]
pub struct HeightSnapshot {
    /// Last height carried by a well-formed event (or the seed value)
    pub height: Height,

    /// Error flagged by the subscription loop, if any
    pub error: Option<FeedError>,
}

/// Overall tracker health
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Events are flowing and the last one parsed cleanly
    Healthy,
    /// A feed error is flagged; the cached height may be stale
    Degraded,
}

/// Health report for a tracker instance
#[derive(Debug, Clone)]
pub struct TrackerHealth {
    /// Tracker status
    pub status: HealthStatus,
    /// Last cached height
    pub height: Height,
    /// Optional status message
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn height_from_string_payload() {
        let event = NewBlockEvent::new(json!({"header": {"height": "12345"}}));
        assert_eq!(event.height().unwrap(), 12345);
    }

    #[test]
    fn height_from_integer_payload() {
        let event = NewBlockEvent::new(json!({"header": {"height": 7}}));
        assert_eq!(event.height().unwrap(), 7);
    }

    #[test]
    fn malformed_payload_is_parse_error() {
        let event = NewBlockEvent::new(json!({"not_a_header": true}));
        assert!(matches!(event.height(), Err(FeedError::Parse(_))));
    }

    #[test]
    fn non_numeric_height_is_parse_error() {
        let event = NewBlockEvent::new(json!({"header": {"height": "twelve"}}));
        assert!(matches!(event.height(), Err(FeedError::Parse(_))));
    }
}
