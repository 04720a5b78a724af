//! Protocol variant selection
//!
//! All layout decisions the decoder makes come from [`ProtocolConfig`], so
//! supporting a new sensor firmware is a matter of a new preset rather than a
//! new decoder.

use crate::constants::protocol::{
    FRAGMENT_HEADER_LEN, MAX_FRAGMENT_LEN, NINE_AXIS_GROUPS, NINE_AXIS_MIN_FRAGMENT_LEN,
    NINE_AXIS_ROWS, NINE_AXIS_SAMPLE_RATE_HZ, SIX_AXIS_GROUPS, SIX_AXIS_HZ_PER_ROW,
    SIX_AXIS_MIN_FRAGMENT_LEN, TAG_CONTINUATION, TAG_FINAL, TAG_FIRST,
};

/// Fragment type carried in byte 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FragmentTag {
    /// Starts a frame, discarding any partial one
    First,
    /// Appends to the frame in progress
    Continuation,
    /// Appends and completes the frame
    Final,
}

impl FragmentTag {
    /// Parse a tag byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            TAG_FIRST => Some(Self::First),
            TAG_CONTINUATION => Some(Self::Continuation),
            TAG_FINAL => Some(Self::Final),
            _ => None,
        }
    }

    /// Wire encoding
    pub fn to_byte(self) -> u8 {
        match self {
            Self::First => TAG_FIRST,
            Self::Continuation => TAG_CONTINUATION,
            Self::Final => TAG_FINAL,
        }
    }
}

/// Known wire layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolVariant {
    /// Accelerometer + gyroscope, row count derived from payload length
    #[default]
    SixAxis,
    /// Accelerometer + gyroscope + magnetometer, fixed row count, 104 Hz
    NineAxis,
}

/// How many rows a reassembled frame holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowCount {
    /// `(payload - header) / row_size`
    Derived,
    /// Declared by the protocol; rows past the payload end are dropped
    Fixed(usize),
}

/// How the row sample rate is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SampleTiming {
    /// `rows × factor` Hz; one frame always spans the same period
    PerRow(u32),
    /// Constant rate in Hz
    Fixed(u32),
}

impl SampleTiming {
    /// Sample rate (Hz) of a frame with `rows` rows
    pub fn rate_hz(&self, rows: usize) -> u32 {
        match *self {
            Self::PerRow(factor) => (rows as u32).saturating_mul(factor),
            Self::Fixed(hz) => hz,
        }
    }
}

/// Wire layout used by the frame decoder
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolConfig {
    /// Variant this configuration was built from
    pub variant: ProtocolVariant,
    /// Fragments shorter than this are rejected
    pub min_fragment_len: usize,
    /// Fragments longer than this are rejected
    pub max_fragment_len: usize,
    /// Axis groups per row (2 = accel+gyro, 3 = +mag)
    pub axis_groups: usize,
    /// Row count rule
    pub rows: RowCount,
    /// Sample rate rule
    pub timing: SampleTiming,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self::six_axis()
    }
}

impl ProtocolConfig {
    /// Accelerometer + gyroscope frames
    pub fn six_axis() -> Self {
        Self {
            variant: ProtocolVariant::SixAxis,
            min_fragment_len: SIX_AXIS_MIN_FRAGMENT_LEN,
            max_fragment_len: MAX_FRAGMENT_LEN,
            axis_groups: SIX_AXIS_GROUPS,
            rows: RowCount::Derived,
            timing: SampleTiming::PerRow(SIX_AXIS_HZ_PER_ROW),
        }
    }

    /// Accelerometer + gyroscope + magnetometer frames
    pub fn nine_axis() -> Self {
        Self {
            variant: ProtocolVariant::NineAxis,
            min_fragment_len: NINE_AXIS_MIN_FRAGMENT_LEN,
            max_fragment_len: MAX_FRAGMENT_LEN,
            axis_groups: NINE_AXIS_GROUPS,
            rows: RowCount::Fixed(NINE_AXIS_ROWS),
            timing: SampleTiming::Fixed(NINE_AXIS_SAMPLE_RATE_HZ),
        }
    }

    /// Preset for a variant
    pub fn for_variant(variant: ProtocolVariant) -> Self {
        match variant {
            ProtocolVariant::SixAxis => Self::six_axis(),
            ProtocolVariant::NineAxis => Self::nine_axis(),
        }
    }

    /// Override the accepted fragment length range
    ///
    /// The minimum never drops below the 2-byte fragment header.
    pub fn with_fragment_len(mut self, min: usize, max: usize) -> Self {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        self.min_fragment_len = min.max(FRAGMENT_HEADER_LEN);
        self.max_fragment_len = max.max(self.min_fragment_len);
        self
    }

    /// Override the row count rule
    pub fn with_rows(mut self, rows: RowCount) -> Self {
        self.rows = rows;
        self
    }

    /// Override the sample rate rule
    pub fn with_timing(mut self, timing: SampleTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Whether rows carry a magnetometer block
    pub fn has_mag(&self) -> bool {
        self.axis_groups >= NINE_AXIS_GROUPS
    }
}
