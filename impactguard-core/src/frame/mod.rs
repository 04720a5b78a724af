//! Wireless Frame Reassembly and Decoding
//!
//! ## Overview
//!
//! The sensor cannot fit a batch of rows into one notification, so it splits
//! every frame into fragments tagged FIRST, CONTINUATION and FINAL. This module
//! stitches the fragments back together and turns the payload into
//! [`RawSample`](crate::sample::RawSample)s.
//!
//! ```text
//! notification ──→ length check ──→ tag ──→ ReassemblyState
//!                                              │
//!                        FINAL ────────────────┘
//!                          │
//!                          ▼
//!             [base ts][accel block][gyro block][mag block]
//!                          │
//!                          ▼
//!                 R rows, stamped base + ⌊i·1000/rate⌋
//! ```
//!
//! ## Protocol Variants
//!
//! Two incompatible layouts exist in the field. Neither is assumed; the
//! variant is chosen at runtime through [`ProtocolConfig`]:
//!
//! | Variant    | Axis groups | Rows            | Sample rate | Min fragment |
//! |------------|-------------|-----------------|-------------|--------------|
//! | `SixAxis`  | accel, gyro | from length     | R × 13 Hz   | 6 bytes      |
//! | `NineAxis` | + mag       | fixed 8         | 104 Hz      | 2 bytes      |
//!
//! `SixAxis` is the default.
//!
//! ## Failure Behaviour
//!
//! Every byte read is bounds-checked. Malformed input produces a
//! [`FrameError`](crate::errors::FrameError) and no samples; a truncated final
//! frame yields the rows that fit. Nothing here can panic on peer input.
//!
//! ## Timestamps
//!
//! Row timestamps are interpolated from the frame's base timestamp and the
//! nominal sample rate. They are an approximation, not a measured per-row
//! clock. Ordering across frames follows notification order and is not
//! checked.

pub mod decoder;
pub mod protocol;

pub use decoder::{Decoded, Frame, FrameDecoder, FrameRows, ReassemblyState};
pub use protocol::{FragmentTag, ProtocolConfig, ProtocolVariant, RowCount, SampleTiming};
