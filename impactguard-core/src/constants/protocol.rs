//! Wire Protocol Layout
//!
//! The sensor splits each batch of rows across several notifications:
//!
//! ```text
//! Fragment:   [tag:u8][reference:u8][payload ...]
//!
//! Reassembled payload (all fragments, headers stripped):
//! ┌────────────┬──────────────────┬──────────────────┬──────────────────┐
//! │ base ts    │ accel rows       │ gyro rows        │ mag rows (9-axis)│
//! │ u32 LE     │ R × [f32; 3] LE  │ R × [f32; 3] LE  │ R × [f32; 3] LE  │
//! └────────────┴──────────────────┴──────────────────┴──────────────────┘
//! ```
//!
//! Source: sensor vendor "data part" notification format

// ===== FRAGMENT TAGS =====

/// First fragment of a frame. Replaces any partial frame in progress.
pub const TAG_FIRST: u8 = 0x01;

/// Middle fragment of a frame.
pub const TAG_CONTINUATION: u8 = 0x02;

/// Last fragment of a frame. Triggers decoding.
pub const TAG_FINAL: u8 = 0x03;

// ===== LAYOUT =====

/// Tag byte plus reference byte at the start of every fragment.
pub const FRAGMENT_HEADER_LEN: usize = 2;

/// Base timestamp at the start of the reassembled payload.
pub const FRAME_HEADER_LEN: usize = 4;

/// One axis group: three little-endian `f32` values.
pub const AXIS_GROUP_LEN: usize = 12;

/// Axis groups per row for accelerometer + gyroscope frames.
pub const SIX_AXIS_GROUPS: usize = 2;

/// Axis groups per row for accelerometer + gyroscope + magnetometer frames.
pub const NINE_AXIS_GROUPS: usize = 3;

// ===== LENGTH LIMITS =====

/// Largest fragment accepted from the peer (bytes).
///
/// Larger notifications indicate a misbehaving peer and are dropped.
pub const MAX_FRAGMENT_LEN: usize = 150;

/// Smallest 6-axis fragment: tag, reference and the 4-byte timestamp.
pub const SIX_AXIS_MIN_FRAGMENT_LEN: usize = 6;

/// Smallest 9-axis fragment: tag and reference only.
pub const NINE_AXIS_MIN_FRAGMENT_LEN: usize = 2;

// ===== TIMING =====

/// Per-row rate factor for 6-axis frames.
///
/// A frame of R rows spans one 1/13 s transmission period, so the row rate is
/// `R × 13` Hz (8 rows → 104 Hz, 4 rows → 52 Hz).
pub const SIX_AXIS_HZ_PER_ROW: u32 = 13;

/// Fixed sample rate of 9-axis frames (Hz).
pub const NINE_AXIS_SAMPLE_RATE_HZ: u32 = 104;

/// Declared row count of 9-axis frames.
pub const NINE_AXIS_ROWS: usize = 8;
