//! Mock transport for testing

use super::Transport;
use crate::error::{Error, Result};
use std::collections::VecDeque;

/// Mock transport for unit testing.
///
/// Reads drain the injected bytes; once empty, `read` reports a timeout
/// (`Ok(0)`) unless the mock was closed, in which case it reports the fatal
/// peer-close error.
pub struct MockTransport {
    read_buffer: VecDeque<u8>,
    write_buffer: Vec<u8>,
    closed: bool,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        MockTransport {
            read_buffer: VecDeque::new(),
            write_buffer: Vec::new(),
            closed: false,
        }
    }

    /// Inject data to be read
    pub fn inject_read(&mut self, data: &[u8]) {
        self.read_buffer.extend(data);
    }

    /// Treat the connection as closed by the peer once drained
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Get all written data
    pub fn written(&self) -> &[u8] {
        &self.write_buffer
    }
}

impl Transport for MockTransport {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        if self.read_buffer.is_empty() {
            return if self.closed {
                Err(Error::ConnectionClosed)
            } else {
                Ok(0)
            };
        }

        let available = self.read_buffer.len().min(buffer.len());
        for item in buffer.iter_mut().take(available) {
            *item = self.read_buffer.pop_front().unwrap();
        }

        Ok(available)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.write_buffer.extend_from_slice(data);
        Ok(())
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}
