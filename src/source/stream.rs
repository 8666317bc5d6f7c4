//! Stream socket acquisition front end.
//!
//! Speaks the query/response status protocol: write the fixed query
//! literal, then drain the newline-delimited response through
//! [`RecordParser`] until the block's close marker or a receive timeout.
//!
//! The field table is cumulative across the whole run. A tick that times
//! out mid-block leaves earlier fields at their last-known-good values and
//! is not an error; the packet for that tick just republishes stale data.

use super::{AcquisitionSource, Reading};
use crate::error::Result;
use crate::parser::RecordParser;
use crate::telemetry::{jd_to_unix, FieldTable, TelemetryField};
use crate::transport::Transport;

const READ_CHUNK: usize = 4096;

/// Acquisition over the raw status socket
pub struct StreamSource<T: Transport> {
    transport: T,
    parser: RecordParser,
    fields: FieldTable,
    query: Vec<u8>,
}

impl<T: Transport> StreamSource<T> {
    /// Create a source over an open transport.
    ///
    /// `query` is the opaque status request literal, sent as-is each tick.
    pub fn new(transport: T, query: &str) -> Self {
        Self {
            transport,
            parser: RecordParser::new(),
            fields: FieldTable::new(),
            query: query.as_bytes().to_vec(),
        }
    }

    #[cfg(test)]
    pub(crate) fn fields(&self) -> &FieldTable {
        &self.fields
    }
}

impl<T: Transport> AcquisitionSource for StreamSource<T> {
    fn refresh(&mut self) -> Result<Reading> {
        self.transport.write_all(&self.query)?;
        self.parser.reset();

        let mut buf = [0u8; READ_CHUNK];
        loop {
            let n = self.transport.read(&mut buf)?;
            if n == 0 {
                // Timeout: parse any trailing partial record and publish
                // whatever accumulated so far
                self.parser.finish(&mut self.fields);
                break;
            }
            self.parser.feed(&buf[..n], &mut self.fields);
            if self.parser.end_of_block() {
                break;
            }
        }

        // The control system stamps each block with its Julian date; the
        // packet carries that time, not the local clock
        let unix_seconds = jd_to_unix(self.fields.get(TelemetryField::JulianDate));

        Ok(Reading {
            fields: self.fields,
            unix_seconds,
        })
    }
}
