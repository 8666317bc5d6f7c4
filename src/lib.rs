//! Scopecast - telescope pointing telemetry bridge
//!
//! Bridges the live telescope-control status feed to a publish/subscribe
//! transport: positional telemetry (azimuth, elevation, RA/Dec, offsets,
//! targets, Julian date) is acquired each tick, encoded into a fixed
//! VITA-49-style extended-context packet, and published on a PUB socket.
//!
//! ## Pipeline
//!
//! ```text
//! status feed -> AcquisitionSource -> FieldTable -> packet encoder -> PUB
//! ```
//!
//! Two acquisition front ends feed the same encoding path:
//! - **Stream**: the line-oriented status protocol on a raw TCP socket,
//!   drained incrementally through [`parser::RecordParser`]
//! - **Document**: the public HTTP status document, one JSON fetch per tick

pub mod config;
pub mod error;
pub mod packet;
pub mod parser;
pub mod publish;
pub mod source;
pub mod telemetry;
pub mod transport;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
