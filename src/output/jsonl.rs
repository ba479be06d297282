//! JSON Lines record sink
//!
//! One JSON object per line, append-as-you-go. The format needs no
//! end-of-file marker, so a cancelled run still leaves a readable file of
//! every record emitted up to that point.

use crate::output::traits::{RecordSink, SinkResult};
use crate::record::ListingRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes records to a file as JSON Lines
pub struct JsonLinesSink {
    writer: BufWriter<File>,
}

impl JsonLinesSink {
    /// Creates (or truncates) the records file at the given path
    pub fn create(path: &Path) -> SinkResult<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl RecordSink for JsonLinesSink {
    fn emit(&mut self, record: &ListingRecord) -> SinkResult<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn finalize(&mut self) -> SinkResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
