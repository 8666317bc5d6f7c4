//! Incremental parser for the telescope status text protocol.
//!
//! The control system answers a status query with a block of newline
//! terminated ASCII records:
//!
//! ```text
//! (dp0        <- opens a block
//! S'AZ_ACT'   <- declares the pending key
//! F123.5      <- value for the pending key
//! .           <- closes the block
//! ```
//!
//! There is no length framing; block boundaries are purely the open/close
//! marker lines, and reads may split a record at any byte. `RecordParser`
//! therefore reassembles lines across [`feed`](RecordParser::feed) calls and
//! runs an explicit state machine over each complete line.
//!
//! Only the four record shapes above are recognized. Everything else
//! (reference lines like `p1`, noise outside a block) is ignored, as are
//! keys that map to no known [`TelemetryField`]. This is not a general
//! deserializer for the upstream's serialization format.

use crate::telemetry::{FieldTable, TelemetryField};

/// Accumulation buffer limit; longer records are truncated, not fatal
const MAX_RECORD_LEN: usize = 4096;

/// Longest key the protocol is expected to carry
const MAX_KEY_LEN: usize = 64;

/// Line prefix that opens a block
const BLOCK_OPEN: &[u8] = b"(dp";

/// Parser state across lines within one block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Outside a block; all lines ignored until a block opens
    Idle,
    /// Inside a block, no key latched yet
    InBlock,
    /// Inside a block with a pending key; `None` means the key was
    /// unrecognized and the next value is a no-op
    AwaitingValue(Option<TelemetryField>),
}

/// Incremental line-oriented record parser.
///
/// Feed raw bytes as they arrive; decoded key/value pairs are written into
/// the caller's [`FieldTable`]. [`end_of_block`](Self::end_of_block) reports
/// when a close marker was seen so the caller can stop draining.
#[derive(Debug)]
pub struct RecordParser {
    line: Vec<u8>,
    state: State,
    end_of_block: bool,
}

impl RecordParser {
    pub fn new() -> Self {
        Self {
            line: Vec::with_capacity(128),
            state: State::Idle,
            end_of_block: false,
        }
    }

    /// Clear buffered bytes, block state, and the pending key.
    ///
    /// Called once per refresh so a record torn by a previous timeout cannot
    /// bleed into the next response.
    pub fn reset(&mut self) {
        self.line.clear();
        self.state = State::Idle;
        self.end_of_block = false;
    }

    /// True once the current block's close marker has been parsed
    pub fn end_of_block(&self) -> bool {
        self.end_of_block
    }

    /// Consume a chunk of stream bytes, decoding every complete line.
    ///
    /// A partial trailing line stays buffered for the next call; records
    /// longer than the buffer limit keep their first [`MAX_RECORD_LEN`]
    /// bytes and drop the rest.
    pub fn feed(&mut self, bytes: &[u8], table: &mut FieldTable) {
        for &byte in bytes {
            if byte == b'\n' {
                self.handle_line(table);
                self.line.clear();
            } else if self.line.len() < MAX_RECORD_LEN {
                self.line.push(byte);
            }
        }
    }

    /// Decode a trailing unterminated line as a final record.
    ///
    /// The close marker is not required to carry a newline, so the stream
    /// source calls this when a drain ends without one.
    pub fn finish(&mut self, table: &mut FieldTable) {
        if !self.line.is_empty() {
            self.handle_line(table);
            self.line.clear();
        }
    }

    /// Classify one complete line and apply its state transition.
    ///
    /// Order matters: the open marker is checked first (it re-opens even
    /// mid-block), then everything outside a block is skipped, then key,
    /// value, and close markers. The key and close markers may sit at
    /// offset 0 or 1 because the upstream prefixes some records with a
    /// one-byte join marker; the value marker only ever appears at offset 0.
    fn handle_line(&mut self, table: &mut FieldTable) {
        let line = self.line.as_slice();

        if line.starts_with(BLOCK_OPEN) {
            self.state = State::InBlock;
            return;
        }
        if self.state == State::Idle {
            return;
        }

        if line.first() == Some(&b'S') || line.get(1) == Some(&b'S') {
            // A line without both quotes leaves the pending key unchanged
            if let Some(field) = Self::parse_key(line) {
                self.state = State::AwaitingValue(field);
            }
        } else if line.first() == Some(&b'F') {
            // The pending key survives the update, so repeated value lines
            // overwrite the same field. No pending key, an unknown key, or
            // an unparseable literal drops the update without aborting the
            // stream.
            if let State::AwaitingValue(Some(field)) = self.state {
                let literal = String::from_utf8_lossy(&line[1..]);
                match literal.trim().parse::<f64>() {
                    Ok(value) => table.set(field, value),
                    Err(_) => log::debug!("Dropping unparseable value line: {:?}", literal),
                }
            }
        } else if line.first() == Some(&b'.') || line.get(1) == Some(&b'.') {
            self.state = State::Idle;
            self.end_of_block = true;
        }
    }

    /// Extract the key between the first and second single quote.
    ///
    /// Returns `None` when the line has no quoted key at all; a key that is
    /// over the key limit or unrecognized comes back as `Some(None)` so it
    /// still latches (and the value that follows is a no-op).
    fn parse_key(line: &[u8]) -> Option<Option<TelemetryField>> {
        let open = line.iter().position(|&b| b == b'\'')?;
        let rest = &line[open + 1..];
        let close = rest.iter().position(|&b| b == b'\'')?;
        let key = &rest[..close];
        if key.is_empty() {
            return None;
        }

        if key.len() > MAX_KEY_LEN {
            return Some(None);
        }
        Some(
            std::str::from_utf8(key)
                .ok()
                .and_then(TelemetryField::from_key),
        )
    }
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_block() {
        let mut parser = RecordParser::new();
        let mut table = FieldTable::new();
        parser.feed(b"(dp0\nS'AZ_ACT'\nF123.5\nS'EL_ACT'\nF45.0\n.\n", &mut table);
        assert_eq!(table.get(TelemetryField::Azimuth), 123.5);
        assert_eq!(table.get(TelemetryField::Elevation), 45.0);
        assert!(parser.end_of_block());
    }

    #[test]
    fn test_repeated_feed_is_idempotent() {
        let block = b"(dp0\nS'AZ_ACT'\nF123.5\n.\n";
        let mut parser = RecordParser::new();
        let mut table = FieldTable::new();
        parser.feed(block, &mut table);
        let first = table;

        parser.feed(block, &mut table);
        assert_eq!(table, first);
    }

    #[test]
    fn test_record_split_across_feeds() {
        let mut parser = RecordParser::new();
        let mut table = FieldTable::new();
        // Split mid-marker: S'AZ | _ACT'
        parser.feed(b"(dp0\nS'AZ", &mut table);
        parser.feed(b"_ACT'\nF42.0\n.\n", &mut table);
        assert_eq!(table.get(TelemetryField::Azimuth), 42.0);
        assert!(parser.end_of_block());
    }

    #[test]
    fn test_lines_outside_block_ignored() {
        let mut parser = RecordParser::new();
        let mut table = FieldTable::new();
        parser.feed(b"S'AZ_ACT'\nF99.0\n", &mut table);
        assert_eq!(table.get(TelemetryField::Azimuth), 0.0);
        assert!(!parser.end_of_block());
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let mut parser = RecordParser::new();
        let mut table = FieldTable::new();
        parser.feed(b"(dp0\nS'UNKNOWN_FIELD'\nF1.0\n.\n", &mut table);
        assert_eq!(table, FieldTable::new());
        assert!(parser.end_of_block());
    }

    #[test]
    fn test_markers_at_offset_one() {
        // Join-marker prefixed records: sS'...' and s.
        let mut parser = RecordParser::new();
        let mut table = FieldTable::new();
        parser.feed(
            b"(dp0\nS'AZ_ACT'\np1\nF10.0\nsS'EL_ACT'\np2\nF20.0\ns.",
            &mut table,
        );
        parser.finish(&mut table);
        assert_eq!(table.get(TelemetryField::Azimuth), 10.0);
        assert_eq!(table.get(TelemetryField::Elevation), 20.0);
        assert!(parser.end_of_block());
    }

    #[test]
    fn test_unterminated_final_line() {
        let mut parser = RecordParser::new();
        let mut table = FieldTable::new();
        parser.feed(b"(dp0\nS'AZ_ACT'\nF77.0", &mut table);
        assert_eq!(table.get(TelemetryField::Azimuth), 0.0);
        parser.finish(&mut table);
        assert_eq!(table.get(TelemetryField::Azimuth), 77.0);
    }

    #[test]
    fn test_malformed_float_drops_update() {
        let mut parser = RecordParser::new();
        let mut table = FieldTable::new();
        parser.feed(b"(dp0\nS'AZ_ACT'\nF12.0\nFnot-a-number\n.\n", &mut table);
        // Previous value stands
        assert_eq!(table.get(TelemetryField::Azimuth), 12.0);
    }

    #[test]
    fn test_value_without_key_ignored() {
        let mut parser = RecordParser::new();
        let mut table = FieldTable::new();
        parser.feed(b"(dp0\nF55.0\n.\n", &mut table);
        assert_eq!(table, FieldTable::new());
    }

    #[test]
    fn test_reset_clears_pending_state() {
        let mut parser = RecordParser::new();
        let mut table = FieldTable::new();
        parser.feed(b"(dp0\nS'AZ_ACT'\nF1.0\n.\n", &mut table);
        assert!(parser.end_of_block());

        parser.reset();
        assert!(!parser.end_of_block());
        // A bare value line after reset has no pending key
        parser.feed(b"(dp0\nF2.0\n.\n", &mut table);
        assert_eq!(table.get(TelemetryField::Azimuth), 1.0);
    }

    #[test]
    fn test_overlong_record_truncated_not_fatal() {
        let mut parser = RecordParser::new();
        let mut table = FieldTable::new();
        let mut junk = vec![b'x'; MAX_RECORD_LEN * 2];
        junk.push(b'\n');
        parser.feed(b"(dp0\n", &mut table);
        parser.feed(&junk, &mut table);
        parser.feed(b"S'AZ_ACT'\nF5.0\n.\n", &mut table);
        assert_eq!(table.get(TelemetryField::Azimuth), 5.0);
        assert!(parser.end_of_block());
    }
}
