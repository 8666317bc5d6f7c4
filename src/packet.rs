//! VITA-49 extended-context packet encoder.
//!
//! # Wire Format Specification
//!
//! Every tick publishes one fixed-size context packet of 39 32-bit words,
//! big-endian on the wire:
//!
//! ```text
//! ┌──────┬─────────────────────────────────────────────────────┐
//! │ Word │ Contents                                            │
//! ├──────┼─────────────────────────────────────────────────────┤
//! │ 0    │ Header (type, flags, TSI/TSF, count, size)          │
//! │ 1    │ Stream identifier (always 0)                        │
//! │ 2-3  │ Class identifier (OUI 0xFF0042, class codes 0)      │
//! │ 4    │ Integer timestamp (Unix seconds)                    │
//! │ 5-6  │ Fractional timestamp (always 0, not populated)      │
//! │ 7-38 │ 32 payload words, IEEE-754 single-precision         │
//! └──────┴─────────────────────────────────────────────────────┘
//! ```
//!
//! Header word layout: packet type `0x5` (extended context) in bits 31-28,
//! class-id flag set (bit 27), trailer flag clear, fine timestamp mode,
//! TSI "other" (`0b11`, Unix seconds) in bits 23-22, TSF "real-time"
//! (`0b10`) in bits 21-20, the 4-bit wrapping packet count in bits 19-16,
//! and the packet size in words (39) in bits 15-0.
//!
//! Payload words carry radians: the eight mapped words come from
//! [`PAYLOAD_LAYOUT`] with their per-field unit conversions; the remaining
//! 24 words are reserved and rewritten to zero on every encode, so nothing
//! leaks from a previous tick. The layout is a fixed contract with
//! downstream consumers; none of the constants here are negotiable at
//! runtime.

use crate::error::{Error, Result};
use crate::telemetry::{FieldTable, PAYLOAD_LAYOUT};

/// Payload words per packet
pub const PAYLOAD_WORDS: usize = 32;
/// Header, stream id, class id, and timestamp words
pub const HEADER_WORDS: usize = 7;
/// Total packet size in 32-bit words
pub const PACKET_WORDS: usize = HEADER_WORDS + PAYLOAD_WORDS;
/// Total packet size in bytes
pub const PACKET_BYTES: usize = PACKET_WORDS * 4;

/// Packet type: extended context
const PACKET_TYPE_EXT_CONTEXT: u32 = 0x5;
/// Timestamp-integer mode: "other" (Unix seconds)
const TSI_OTHER: u32 = 0x3;
/// Timestamp-fractional mode: real time
const TSF_REAL_TIME: u32 = 0x2;
/// Organizationally-unique identifier assigned to this deployment
const CLASS_ID_OUI: u32 = 0xFF0042;
/// Stream identifier (single stream deployment)
const STREAM_ID: u32 = 0;
/// The packet count field is 4 bits wide
const PACKET_COUNT_MODULUS: u8 = 16;

/// Build the header word for a given wrapping packet count
fn header_word(sequence: u8) -> u32 {
    (PACKET_TYPE_EXT_CONTEXT << 28)
        | (1 << 27)
        | (TSI_OTHER << 22)
        | (TSF_REAL_TIME << 20)
        | ((u32::from(sequence) & 0xF) << 16)
        | PACKET_WORDS as u32
}

/// Encode one telemetry packet into `buf`.
///
/// `buf` must be exactly [`PACKET_BYTES`] long; anything else is a
/// programming defect and fails with [`Error::Encode`].
pub fn encode_into(
    fields: &FieldTable,
    unix_seconds: u32,
    sequence: u8,
    buf: &mut [u8],
) -> Result<()> {
    if buf.len() != PACKET_BYTES {
        return Err(Error::Encode(format!(
            "packet buffer is {} bytes, expected {}",
            buf.len(),
            PACKET_BYTES
        )));
    }

    let mut words = [0u32; PACKET_WORDS];
    words[0] = header_word(sequence);
    words[1] = STREAM_ID;
    words[2] = CLASS_ID_OUI;
    words[3] = 0; // information and packet class codes
    words[4] = unix_seconds;
    // words[5..7] fractional seconds stay zero

    for (field, word, unit) in PAYLOAD_LAYOUT {
        let radians = unit.to_radians(fields.get(field)) as f32;
        words[HEADER_WORDS + word] = radians.to_bits();
    }

    for (i, word) in words.iter().enumerate() {
        buf[i * 4..(i + 1) * 4].copy_from_slice(&word.to_be_bytes());
    }
    Ok(())
}

/// Stateful encoder carrying the wrapping packet count.
///
/// The count increments once per successful encode and wraps 15 → 0, so
/// consecutive packets on the wire let a subscriber detect drops.
pub struct PacketEncoder {
    sequence: u8,
}

impl PacketEncoder {
    pub fn new() -> Self {
        Self { sequence: 0 }
    }

    /// Encode the next packet and advance the count
    pub fn encode_next(
        &mut self,
        fields: &FieldTable,
        unix_seconds: u32,
        buf: &mut [u8],
    ) -> Result<()> {
        encode_into(fields, unix_seconds, self.sequence, buf)?;
        self.sequence = (self.sequence + 1) % PACKET_COUNT_MODULUS;
        Ok(())
    }
}

impl Default for PacketEncoder {
    fn default() -> Self {
        Self::new()
    }
}
