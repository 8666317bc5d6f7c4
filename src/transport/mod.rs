//! Transport layer for the upstream status connection

use crate::error::Result;

mod tcp;
pub use tcp::TcpTransport;

#[cfg(test)]
pub(crate) mod mock;

/// Byte transport for the status protocol.
///
/// `read` returning `Ok(0)` means nothing arrived before the receive
/// timeout; that is the non-fatal "stop draining for this tick" signal.
/// Hard failures (peer close, I/O errors) surface as `Err`.
pub trait Transport: Send {
    /// Read available bytes into the buffer, returning the count read
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Write the whole buffer (blocking until complete)
    fn write_all(&mut self, data: &[u8]) -> Result<()>;
}
