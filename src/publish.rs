//! Packet publishing: the PUB socket and the tick cadence driver.

use crate::error::Result;
use crate::packet::{PacketEncoder, PACKET_BYTES};
use crate::source::AcquisitionSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Wake-up granularity between ticks, so the stop flag is observed with
/// bounded latency instead of sleeping a full period in one shot
const SLEEP_GRANULARITY: Duration = Duration::from_millis(1);

/// PUB socket bound to the local publish endpoint.
///
/// Fire-and-forget: one packet per tick, no acknowledgment, fan-out is the
/// transport's business. Bind failures are fatal at startup.
pub struct ZmqPublisher {
    // The context must outlive the socket
    _context: zmq::Context,
    socket: zmq::Socket,
}

impl ZmqPublisher {
    /// Create the PUB socket and bind it
    pub fn bind(endpoint: &str, send_hwm: i32) -> Result<Self> {
        let context = zmq::Context::new();
        let socket = context.socket(zmq::PUB)?;
        socket.set_sndhwm(send_hwm)?;
        socket.bind(endpoint)?;

        log::info!("Publishing on {}", endpoint);

        Ok(ZmqPublisher {
            _context: context,
            socket,
        })
    }

    /// Send one encoded packet as a single message
    pub fn send(&self, packet: &[u8]) -> Result<()> {
        self.socket.send(packet, 0)?;
        Ok(())
    }
}

/// Fixed-cadence driver: acquire, encode, publish, sleep.
///
/// Runs until the shared stop flag clears. Fatal acquisition, encode, or
/// send errors propagate to the caller, which terminates the process.
/// Timeout-class stalls never surface here; the tick just republishes
/// stale data.
pub struct PublishLoop {
    source: Box<dyn AcquisitionSource>,
    publisher: ZmqPublisher,
    interval: Duration,
    running: Arc<AtomicBool>,
    encoder: PacketEncoder,
    // Reused across ticks; the encoder rewrites every byte
    buffer: [u8; PACKET_BYTES],
}

impl PublishLoop {
    pub fn new(
        source: Box<dyn AcquisitionSource>,
        publisher: ZmqPublisher,
        interval: Duration,
        running: Arc<AtomicBool>,
    ) -> Self {
        Self {
            source,
            publisher,
            interval,
            running,
            encoder: PacketEncoder::new(),
            buffer: [0u8; PACKET_BYTES],
        }
    }

    /// Run until the stop flag clears
    pub fn run(&mut self) -> Result<()> {
        log::info!(
            "Publish loop started ({} ms tick)",
            self.interval.as_millis()
        );

        let mut last_tick = Instant::now();

        while self.running.load(Ordering::Relaxed) {
            if last_tick.elapsed() >= self.interval {
                last_tick = Instant::now();

                let reading = self.source.refresh()?;
                self.encoder
                    .encode_next(&reading.fields, reading.unix_seconds, &mut self.buffer)?;
                self.publisher.send(&self.buffer)?;

                log::trace!("Published packet (ts: {})", reading.unix_seconds);
            }

            thread::sleep(SLEEP_GRANULARITY);
        }

        log::info!("Publish loop stopped");
        Ok(())
    }
}
