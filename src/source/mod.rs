//! Acquisition sources for the telescope status feed.
//!
//! Two front ends exist for the same downstream path: the line-oriented
//! status protocol on a raw TCP socket ([`StreamSource`]) and the public
//! HTTP status document ([`DocumentSource`]). The publish loop depends only
//! on the [`AcquisitionSource`] capability; the variant is selected once at
//! startup from configuration.

use crate::error::Result;
use crate::telemetry::FieldTable;

mod document;
mod stream;

pub use document::DocumentSource;
pub use stream::StreamSource;

/// One tick's worth of acquired telemetry.
#[derive(Debug, Clone, Copy)]
pub struct Reading {
    /// Field snapshot to encode
    pub fields: FieldTable,
    /// Integer Unix seconds the packet timestamp must carry
    pub unix_seconds: u32,
}

/// Capability interface over the two acquisition variants.
///
/// The variants deliberately differ in persistence: the stream protocol is
/// an incremental feed, so [`StreamSource`] carries last-known-good values
/// across ticks; the HTTP document is a complete snapshot, so
/// [`DocumentSource`] rebuilds its table from each fetch and absent fields
/// read zero.
pub trait AcquisitionSource {
    /// Refresh telemetry for one tick.
    ///
    /// A timeout upstream is not an error: the returned reading simply
    /// carries whatever state accumulated. Hard transport or decode
    /// failures propagate and are fatal to the process.
    fn refresh(&mut self) -> Result<Reading>;
}
