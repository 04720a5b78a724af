//! Fragment reassembly and payload decoding
//!
//! ## Reassembly State Machine
//!
//! ```text
//!            FIRST                 CONTINUATION
//!   Idle ───────────→ Assembling ─────────────┐
//!    ↑                 │   ↑  │               │
//!    │                 │   └──┼───────────────┘
//!    │      FINAL      │      │ FIRST (restart)
//!    └─────────────────┘      └──→ Assembling
//! ```
//!
//! - A FIRST fragment always wins: any partial frame is discarded.
//! - CONTINUATION or FINAL with no frame in progress is an orphan and is
//!   ignored with the state unchanged.
//! - After FINAL the state returns to Idle whether decoding succeeded or not.
//! - Overflowing the accumulation buffer discards the partial frame.

use heapless::Vec;

use crate::{
    constants::{
        buffers::{FRAME_BUFFER_CAPACITY, MAX_FRAME_ROWS},
        protocol::{AXIS_GROUP_LEN, FRAGMENT_HEADER_LEN, FRAME_HEADER_LEN},
    },
    errors::{FrameError, FrameResult},
    frame::protocol::{FragmentTag, ProtocolConfig, RowCount},
    math::Vec3,
    sample::RawSample,
    time::{self, Timestamp},
};

/// Rows decoded from one frame
pub type FrameRows = Vec<RawSample, MAX_FRAME_ROWS>;

/// A fully decoded frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Reference (subscription) id carried by the fragments
    pub reference: u8,
    /// Base timestamp from the frame header
    pub base_timestamp: Timestamp,
    /// Sample rate used to stamp the rows (Hz)
    pub sample_rate_hz: u32,
    /// Decoded rows in timestamp order
    pub rows: FrameRows,
    /// Declared rows that did not fit the payload
    pub dropped_rows: usize,
}

/// Outcome of feeding one fragment
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Fragment buffered; the frame is not complete yet
    Pending {
        /// Bytes accumulated so far
        buffered: usize,
    },
    /// FINAL fragment processed
    Frame(Frame),
}

impl Decoded {
    /// Rows produced by this fragment (empty while pending)
    pub fn rows(&self) -> &[RawSample] {
        match self {
            Self::Pending { .. } => &[],
            Self::Frame(frame) => &frame.rows,
        }
    }
}

/// Partial frame carried between fragments
#[derive(Debug, Clone, Default)]
pub struct ReassemblyState {
    /// Concatenated payloads, fragment headers stripped
    buffer: Vec<u8, FRAME_BUFFER_CAPACITY>,
    /// Reference of the frame in progress; `None` when idle
    reference: Option<u8>,
}

impl ReassemblyState {
    /// Empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no frame is in progress
    pub fn is_idle(&self) -> bool {
        self.reference.is_none()
    }

    /// Reference of the frame in progress
    pub fn reference(&self) -> Option<u8> {
        self.reference
    }

    /// Bytes accumulated so far
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing is accumulated
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Accumulated payload
    pub fn payload(&self) -> &[u8] {
        &self.buffer
    }

    /// Discard any partial frame
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.reference = None;
    }

    /// Begin a new frame, replacing any partial one
    fn start(&mut self, reference: u8, payload: &[u8]) -> FrameResult<()> {
        self.clear();
        self.reference = Some(reference);
        self.extend(payload)
    }

    /// Append to the frame in progress
    ///
    /// Orphans and foreign references leave the state untouched.
    fn append(&mut self, tag: u8, reference: u8, payload: &[u8]) -> FrameResult<()> {
        match self.reference {
            None => Err(FrameError::OrphanFragment { tag }),
            Some(expected) if expected != reference => Err(FrameError::ReferenceMismatch {
                expected,
                found: reference,
            }),
            Some(_) => self.extend(payload),
        }
    }

    fn extend(&mut self, payload: &[u8]) -> FrameResult<()> {
        if self.buffer.extend_from_slice(payload).is_err() {
            let len = self.buffer.len() + payload.len();
            self.clear();
            return Err(FrameError::Overflow {
                len,
                capacity: FRAME_BUFFER_CAPACITY,
            });
        }
        Ok(())
    }
}

/// Turns notification fragments into raw samples
///
/// ## Example
///
/// ```rust
/// use impactguard_core::{Decoded, FrameDecoder, ProtocolConfig};
///
/// let mut decoder = FrameDecoder::new(ProtocolConfig::six_axis());
///
/// // FIRST: tag, reference, then the start of the payload (base timestamp)
/// let first = [0x01, 0x07, 0xe8, 0x03, 0x00, 0x00];
/// assert!(matches!(decoder.decode(&first), Ok(Decoded::Pending { buffered: 4 })));
///
/// // FINAL: one accel row and one gyro row
/// let mut last = vec![0x03, 0x07];
/// for v in [0.0f32, 0.0, 9.81, 0.0, 0.0, 0.0] {
///     last.extend_from_slice(&v.to_le_bytes());
/// }
/// let decoded = decoder.decode(&last).unwrap();
/// assert_eq!(decoded.rows().len(), 1);
/// assert_eq!(decoded.rows()[0].timestamp, 1000);
/// ```
#[derive(Debug, Clone)]
pub struct FrameDecoder {
    config: ProtocolConfig,
    state: ReassemblyState,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new(ProtocolConfig::default())
    }
}

impl FrameDecoder {
    /// Decoder for the given wire layout
    pub fn new(config: ProtocolConfig) -> Self {
        Self {
            config,
            state: ReassemblyState::new(),
        }
    }

    /// Active wire layout
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Current reassembly state
    pub fn state(&self) -> &ReassemblyState {
        &self.state
    }

    /// Discard any partial frame
    pub fn reset(&mut self) {
        self.state.clear();
    }

    /// Feed one notification
    ///
    /// Length and tag violations are rejected before the reassembly state is
    /// touched.
    pub fn decode(&mut self, fragment: &[u8]) -> FrameResult<Decoded> {
        let len = fragment.len();
        let min = self.config.min_fragment_len.max(FRAGMENT_HEADER_LEN);
        if len < min {
            return Err(FrameError::TooShort { len, min });
        }
        if len > self.config.max_fragment_len {
            return Err(FrameError::TooLong {
                len,
                max: self.config.max_fragment_len,
            });
        }

        let (header, payload) = fragment.split_at(FRAGMENT_HEADER_LEN);
        let (tag_byte, reference) = (header[0], header[1]);
        let tag = FragmentTag::from_byte(tag_byte)
            .ok_or(FrameError::UnknownTag { tag: tag_byte })?;

        match tag {
            FragmentTag::First => {
                self.state.start(reference, payload)?;
                Ok(Decoded::Pending {
                    buffered: self.state.len(),
                })
            }
            FragmentTag::Continuation => {
                self.state.append(tag_byte, reference, payload)?;
                Ok(Decoded::Pending {
                    buffered: self.state.len(),
                })
            }
            FragmentTag::Final => {
                self.state.append(tag_byte, reference, payload)?;
                let frame = decode_payload(&self.config, reference, self.state.payload());
                self.state.clear();
                frame.map(Decoded::Frame)
            }
        }
    }
}

/// Decode a reassembled payload
///
/// Planar layout: all accel rows, then all gyro rows, then all mag rows.
/// A row is emitted only when every one of its fields lies inside `payload`
/// and is a finite number. A fixed row count is capped at [`MAX_FRAME_ROWS`].
fn decode_payload(config: &ProtocolConfig, reference: u8, payload: &[u8]) -> FrameResult<Frame> {
    let base_timestamp =
        read_u32_le(payload, 0).ok_or(FrameError::TruncatedHeader { len: payload.len() })?;
    let body = &payload[FRAME_HEADER_LEN..];

    let row_size = config.axis_groups * AXIS_GROUP_LEN;
    let declared_rows = match config.rows {
        RowCount::Derived if row_size > 0 => body.len() / row_size,
        RowCount::Derived => 0,
        RowCount::Fixed(rows) => rows.min(MAX_FRAME_ROWS),
    };
    let sample_rate_hz = config.timing.rate_hz(declared_rows);
    let block_len = declared_rows * AXIS_GROUP_LEN;

    let mut rows = FrameRows::new();
    let mut dropped_rows = 0;

    for i in 0..declared_rows {
        let offset = i * AXIS_GROUP_LEN;
        let timestamp = time::row_timestamp(base_timestamp, i, sample_rate_hz);

        let row = match (read_vec3(body, offset), read_vec3(body, block_len + offset)) {
            (Some(accel), Some(gyro)) if config.has_mag() => {
                read_vec3(body, 2 * block_len + offset)
                    .map(|mag| RawSample::new(timestamp, accel, gyro).with_mag(mag))
            }
            (Some(accel), Some(gyro)) => Some(RawSample::new(timestamp, accel, gyro)),
            _ => None,
        };

        let pushed = match row {
            Some(row) if row.is_finite() => rows.push(row).is_ok(),
            Some(_) => {
                log_debug!("Frame ref {}: row {} is not finite", reference, i);
                false
            }
            None => false,
        };
        if !pushed {
            dropped_rows += 1;
        }
    }

    if dropped_rows > 0 {
        log_debug!(
            "Frame ref {}: dropped {} of {} rows from {} payload bytes",
            reference, dropped_rows, declared_rows, payload.len()
        );
    }

    Ok(Frame {
        reference,
        base_timestamp,
        sample_rate_hz,
        rows,
        dropped_rows,
    })
}

/// Bounds-checked little-endian `u32`
fn read_u32_le(buf: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(4)?;
    let bytes: [u8; 4] = buf.get(offset..end)?.try_into().ok()?;
    Some(u32::from_le_bytes(bytes))
}

/// Bounds-checked little-endian IEEE-754 `f32`
fn read_f32_le(buf: &[u8], offset: usize) -> Option<f32> {
    read_u32_le(buf, offset).map(f32::from_bits)
}

/// Three consecutive `f32` values
fn read_vec3(buf: &[u8], offset: usize) -> Option<Vec3> {
    Some([
        read_f32_le(buf, offset)?,
        read_f32_le(buf, offset.checked_add(4)?)?,
        read_f32_le(buf, offset.checked_add(8)?)?,
    ])
}
