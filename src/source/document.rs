//! HTTP document acquisition front end.
//!
//! The observatory publishes the same pointing status as a JSON object on a
//! public endpoint. One GET per tick, eight named numeric fields, no state
//! carried between fetches: the document is a complete snapshot, so a field
//! the upstream stops reporting drops to zero on the next tick instead of
//! going stale.

use super::{AcquisitionSource, Reading};
use crate::error::{Error, Result};
use crate::telemetry::{FieldTable, TelemetryField};
use reqwest::blocking::Client;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Numeric document keys consumed per fetch.
///
/// The document also carries time fields (`JD`, `MJD`) which the packet
/// does not consume; this variant stamps packets with the local clock.
const DOCUMENT_KEYS: [(&str, TelemetryField); 8] = [
    ("AZ_ACT", TelemetryField::Azimuth),
    ("EL_ACT", TelemetryField::Elevation),
    ("AZ_OFF", TelemetryField::AzimuthOffset),
    ("EL_OFF", TelemetryField::ElevationOffset),
    ("RA_ACT", TelemetryField::RightAscension),
    ("DEC_ACT", TelemetryField::Declination),
    ("RA_TAR", TelemetryField::RightAscensionTarget),
    ("DEC_TAR", TelemetryField::DeclinationTarget),
];

/// Acquisition from the HTTP status document
pub struct DocumentSource {
    client: Client,
    url: String,
}

impl DocumentSource {
    /// Build the HTTP client for the fixed status URL
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl AcquisitionSource for DocumentSource {
    fn refresh(&mut self) -> Result<Reading> {
        let doc: serde_json::Value = self
            .client
            .get(&self.url)
            .send()?
            .error_for_status()?
            .json()?;

        let fields = extract_fields(&doc)?;

        let unix_seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);

        Ok(Reading {
            fields,
            unix_seconds,
        })
    }
}

/// Build a fresh field table from one status document.
///
/// Absent keys default to zero; a key that is present but non-numeric is a
/// decode error for the tick.
fn extract_fields(doc: &serde_json::Value) -> Result<FieldTable> {
    let object = doc
        .as_object()
        .ok_or_else(|| Error::Decode("status document is not a JSON object".to_string()))?;

    let mut fields = FieldTable::new();
    for (key, field) in DOCUMENT_KEYS {
        if let Some(value) = object.get(key) {
            let number = value
                .as_f64()
                .ok_or_else(|| Error::Decode(format!("non-numeric value for {}", key)))?;
            fields.set(field, number);
        }
    }
    Ok(fields)
}
