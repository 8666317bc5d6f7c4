//! TCP transport implementation

use super::Transport;
use crate::error::{Error, Result};
use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

/// TCP transport for the telescope status socket
pub struct TcpTransport {
    stream: TcpStream,
}

impl TcpTransport {
    /// Resolve and connect to the status server.
    ///
    /// # Arguments
    /// * `host` - Hostname or address of the control system
    /// * `port` - Status protocol port
    /// * `read_timeout` - Receive timeout bounding each drain read
    pub fn connect(host: &str, port: u16, read_timeout: Duration) -> Result<Self> {
        let stream = TcpStream::connect((host, port))?;
        stream.set_read_timeout(Some(read_timeout))?;

        log::info!("Connected to {}:{}", host, port);

        Ok(TcpTransport { stream })
    }
}

impl Transport for TcpTransport {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        match self.stream.read(buffer) {
            // An orderly zero-length read is the peer closing, not a timeout
            Ok(0) => Err(Error::ConnectionClosed),
            Ok(n) => Ok(n),
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => Ok(0),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.stream.write_all(data)?;
        Ok(())
    }
}
