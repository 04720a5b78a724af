//! Helmet impact telemetry engine for ImpactGuard
//!
//! Turns BLE notification fragments from a helmet-mounted IMU into
//! orientation-compensated motion samples and head injury metrics.
//! Designed to run inside the wireless stack's notification handler.
//!
//! Key constraints:
//! - No heap allocation in the hot path
//! - Malformed input never panics; it is logged and dropped
//! - Fixed memory: 512-byte reassembly buffer, bounded sample history
//!
//! ```no_run
//! use impactguard_core::{ImpactPipeline, PipelineConfig};
//! use impactguard_core::traits::FragmentSink;
//!
//! let mut pipeline: ImpactPipeline = ImpactPipeline::new(PipelineConfig::default());
//!
//! # let notification: &[u8] = &[];
//! // From the BLE notification callback
//! match pipeline.on_fragment(notification) {
//!     Ok(report) if report.impact_level.is_impact() => {}, // Alert the rider
//!     Ok(_) => {},
//!     Err(_) => {}, // Already logged and dropped
//! }
//!
//! let hic = pipeline.hic(15);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod buffer;
pub mod constants;
pub mod errors;
pub mod frame;
pub mod fusion;
pub mod history;
pub mod math;
pub mod metrics;
pub mod pipeline;
pub mod sample;
pub mod time;
pub mod traits;

// Public API
pub use errors::{FrameError, FrameResult};
pub use frame::{Decoded, Frame, FrameDecoder, ProtocolConfig, ProtocolVariant};
pub use fusion::{EstimatorConfig, OrientationEstimator, Quaternion};
pub use history::{History, HistoryWindow, WindowSpan};
pub use metrics::{ImpactConfig, ImpactLevel, MetricEngine, MetricsReport};
pub use pipeline::{FrameReport, ImpactPipeline, PipelineConfig};
pub use sample::{RawSample, Sample};
pub use traits::{FragmentSink, LinkEvent, LinkEventSink};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
