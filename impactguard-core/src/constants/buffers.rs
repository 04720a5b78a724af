//! Buffer Sizes
//!
//! Everything is allocated up front. These sizes bound the memory the
//! pipeline can ever use, whatever the peer sends.

/// Samples retained in the history.
///
/// 500 samples cover about 9.6 s at 52 Hz (4.8 s at 104 Hz), enough for the
/// riding-speed window before an impact.
pub const HISTORY_CAPACITY: usize = 500;

/// Reassembly buffer capacity (bytes).
///
/// A full 9-axis frame is 4 + 3 × 8 × 12 = 292 bytes; three maximum-size
/// fragments carry 3 × 148 = 444 bytes.
pub const FRAME_BUFFER_CAPACITY: usize = 512;

/// Rows a single frame can produce.
///
/// A 6-axis frame filling the reassembly buffer holds (512 - 4) / 24 = 21 rows.
pub const MAX_FRAME_ROWS: usize = 32;
