//! Record output handling
//!
//! The crawler hands every finished record to a [`RecordSink`]; the JSON
//! Lines implementation is the default destination.

mod jsonl;
mod traits;

pub use jsonl::JsonLinesSink;
pub use traits::{RecordSink, SinkError, SinkResult};
