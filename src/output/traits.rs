//! Output sink trait and error types
//!
//! Emitting a finished record is the crawler's terminal action; where the
//! record goes is the sink's business. Implementations receive records in
//! completion order, which is not discovery order.

use crate::record::ListingRecord;
use thiserror::Error;

/// Errors that can occur while emitting records
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Destination for finished listing records
pub trait RecordSink {
    /// Writes one finished record
    fn emit(&mut self, record: &ListingRecord) -> SinkResult<()>;

    /// Flushes and closes the sink at the end of a run
    fn finalize(&mut self) -> SinkResult<()> {
        Ok(())
    }
}
