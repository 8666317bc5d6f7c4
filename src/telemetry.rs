//! Telemetry field registry and payload layout.
//!
//! Key types:
//! - [`TelemetryField`]: the closed set of pointing values the bridge knows
//! - [`FieldTable`]: latest value per field, updated by acquisition, read by
//!   the packet encoder
//! - [`PAYLOAD_LAYOUT`]: the single field → payload word → unit table
//!   consulted by the encoder and by tests

use std::f64::consts::PI;

/// Number of recognized telemetry fields
pub const FIELD_COUNT: usize = 11;

/// Pointing telemetry fields reported by the telescope control system.
///
/// The set is closed: status keys that map to none of these are ignored,
/// which keeps the bridge forward-compatible with protocol additions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryField {
    /// Current azimuth (degrees)
    Azimuth,
    /// Current elevation (degrees)
    Elevation,
    /// Current right ascension (hours)
    RightAscension,
    /// Current declination (degrees)
    Declination,
    /// Target right ascension (hours)
    RightAscensionTarget,
    /// Target declination (degrees)
    DeclinationTarget,
    /// Azimuth pointing offset (degrees)
    AzimuthOffset,
    /// Elevation pointing offset (degrees)
    ElevationOffset,
    /// Target azimuth (degrees)
    AzimuthTarget,
    /// Target elevation (degrees)
    ElevationTarget,
    /// Julian date of the status sample
    JulianDate,
}

impl TelemetryField {
    /// Look up a field by its upstream key name.
    ///
    /// The stream protocol spells the offsets `AZ_OFFSET`/`EL_OFFSET`, the
    /// HTTP document `AZ_OFF`/`EL_OFF`; both map here. Unknown keys return
    /// `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "AZ_ACT" => Some(Self::Azimuth),
            "EL_ACT" => Some(Self::Elevation),
            "RA_ACT" => Some(Self::RightAscension),
            "DEC_ACT" => Some(Self::Declination),
            "RA_TAR" => Some(Self::RightAscensionTarget),
            "DEC_TAR" => Some(Self::DeclinationTarget),
            "AZ_OFFSET" | "AZ_OFF" => Some(Self::AzimuthOffset),
            "EL_OFFSET" | "EL_OFF" => Some(Self::ElevationOffset),
            "AZ_TAR" => Some(Self::AzimuthTarget),
            "EL_TAR" => Some(Self::ElevationTarget),
            "JD" => Some(Self::JulianDate),
            _ => None,
        }
    }
}

/// Angle unit of a field as reported upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    /// Degrees, converted with ×π/180
    Degrees,
    /// Hours of right ascension, converted with ×π/12
    Hours,
}

impl AngleUnit {
    /// Convert a raw upstream value to radians.
    #[inline]
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Degrees => value * PI / 180.0,
            AngleUnit::Hours => value * PI / 12.0,
        }
    }
}

/// Mapping of fields to packet payload words and their unit conversions.
///
/// Words 2-7 and 14-31 are reserved and always zero. The azimuth/elevation
/// *target* fields and the Julian date have no payload word: the targets are
/// tracked but not published, the Julian date feeds the packet timestamp.
pub const PAYLOAD_LAYOUT: [(TelemetryField, usize, AngleUnit); 8] = [
    (TelemetryField::Azimuth, 0, AngleUnit::Degrees),
    (TelemetryField::Elevation, 1, AngleUnit::Degrees),
    (TelemetryField::AzimuthOffset, 8, AngleUnit::Degrees),
    (TelemetryField::ElevationOffset, 9, AngleUnit::Degrees),
    (TelemetryField::RightAscensionTarget, 10, AngleUnit::Hours),
    (TelemetryField::DeclinationTarget, 11, AngleUnit::Degrees),
    (TelemetryField::RightAscension, 12, AngleUnit::Hours),
    (TelemetryField::Declination, 13, AngleUnit::Degrees),
];

/// Latest known value per telemetry field.
///
/// All fields read zero until first observed; updates are last-write-wins.
/// Cheap to copy, so acquisition hands the encoder a snapshot by value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldTable {
    values: [f64; FIELD_COUNT],
}

impl FieldTable {
    /// Create a table with all fields zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest value for a field
    #[inline]
    pub fn get(&self, field: TelemetryField) -> f64 {
        self.values[field as usize]
    }

    /// Update a field in place
    #[inline]
    pub fn set(&mut self, field: TelemetryField, value: f64) {
        self.values[field as usize] = value;
    }
}

/// Integer Unix seconds from a Julian date.
///
/// Negative results (JD before the epoch, including the all-zero default
/// table) saturate to zero.
pub fn jd_to_unix(jd: f64) -> u32 {
    ((jd - 2_440_587.5) * 86_400.0).round() as u32
}
