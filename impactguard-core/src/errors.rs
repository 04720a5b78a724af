//! Error Types for Malformed Wireless Frames
//!
//! ## Design Philosophy
//!
//! The decoder sits directly behind the wireless stack's notification callback.
//! Nothing supervises the firmware, so a misbehaving peer must never be able to
//! halt it. Every malformed input is reported as a small `Copy` value, logged,
//! and dropped:
//!
//! 1. **Small Size**: Variants carry only a few integers, no strings.
//!
//! 2. **No Heap Allocation**: Errors are returned on every notification and
//!    must not allocate.
//!
//! 3. **Fail Closed**: Whatever the error, the decoder either leaves its
//!    reassembly state untouched or discards the partial frame. It never emits
//!    samples built from out-of-bounds bytes.
//!
//! ## Error Categories
//!
//! ### Length Violations
//! - `TooShort`: fragment below the protocol minimum
//! - `TooLong`: fragment above the protocol maximum
//! - `Overflow`: reassembled frame would exceed the accumulation buffer
//!
//! ### Framing Violations
//! - `UnknownTag`: byte 0 is not a recognised fragment tag
//! - `OrphanFragment`: continuation or final fragment with no first fragment
//! - `ReferenceMismatch`: fragment belongs to another subscription
//!
//! ### Payload Violations
//! - `TruncatedHeader`: final frame too short to hold the base timestamp
//!
//! Metric queries never fail: missing data yields `0.0`.
//!
//! ```rust
//! use impactguard_core::{FrameDecoder, FrameError, ProtocolConfig};
//!
//! let mut decoder = FrameDecoder::new(ProtocolConfig::six_axis());
//!
//! match decoder.decode(&[0x01]) {
//!     Err(FrameError::TooShort { .. }) => {
//!         // Fragment dropped, reassembly state untouched
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for frame decoding
pub type FrameResult<T> = Result<T, FrameError>;

/// Frame decoding errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Fragment shorter than the protocol minimum
    #[error("Fragment of {len} bytes shorter than minimum {min}")]
    TooShort {
        /// Received fragment length
        len: usize,
        /// Minimum accepted length
        min: usize,
    },

    /// Fragment longer than the protocol maximum
    #[error("Fragment of {len} bytes exceeds maximum {max}")]
    TooLong {
        /// Received fragment length
        len: usize,
        /// Maximum accepted length
        max: usize,
    },

    /// Byte 0 is not a known fragment tag
    #[error("Unknown fragment tag {tag:#04x}")]
    UnknownTag {
        /// The unrecognised tag byte
        tag: u8,
    },

    /// Continuation or final fragment arrived with no frame in progress
    #[error("Fragment tag {tag:#04x} without a first fragment")]
    OrphanFragment {
        /// Tag of the orphaned fragment
        tag: u8,
    },

    /// Fragment reference differs from the frame in progress
    #[error("Fragment reference {found} does not match frame reference {expected}")]
    ReferenceMismatch {
        /// Reference of the frame being assembled
        expected: u8,
        /// Reference carried by the fragment
        found: u8,
    },

    /// Reassembled frame would not fit the accumulation buffer
    #[error("Frame of {len} bytes overflows buffer of {capacity}")]
    Overflow {
        /// Length the frame would have reached
        len: usize,
        /// Accumulation buffer capacity
        capacity: usize,
    },

    /// Final frame too short to hold the base timestamp header
    #[error("Frame of {len} bytes too short for header")]
    TruncatedHeader {
        /// Reassembled payload length
        len: usize,
    },
}

impl FrameError {
    /// Errors expected during normal operation: fragments left over from a
    /// frame that was already abandoned, or from another subscription
    pub fn is_stale_fragment(&self) -> bool {
        matches!(self, Self::OrphanFragment { .. } | Self::ReferenceMismatch { .. })
    }

    /// Whether the partial frame in progress was discarded
    pub fn discards_frame(&self) -> bool {
        matches!(self, Self::Overflow { .. } | Self::TruncatedHeader { .. })
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FrameError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::TooShort { len, min } =>
                defmt::write!(fmt, "Fragment {} < min {}", len, min),
            Self::TooLong { len, max } =>
                defmt::write!(fmt, "Fragment {} > max {}", len, max),
            Self::UnknownTag { tag } =>
                defmt::write!(fmt, "Unknown tag {=u8:#x}", tag),
            Self::OrphanFragment { tag } =>
                defmt::write!(fmt, "Orphan fragment {=u8:#x}", tag),
            Self::ReferenceMismatch { expected, found } =>
                defmt::write!(fmt, "Reference {} != {}", found, expected),
            Self::Overflow { len, capacity } =>
                defmt::write!(fmt, "Frame {} overflows {}", len, capacity),
            Self::TruncatedHeader { len } =>
                defmt::write!(fmt, "Frame {} too short for header", len),
        }
    }
}
