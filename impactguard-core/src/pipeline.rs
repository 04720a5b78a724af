//! Fragment-to-Metric Pipeline
//!
//! ## Overview
//!
//! [`ImpactPipeline`] owns every piece of processing state and is driven
//! synchronously from the wireless notification handler:
//!
//! ```text
//! on_fragment(&[u8])
//!      │
//!      ▼
//! FrameDecoder ──Pending──→ (wait for more fragments)
//!      │Frame
//!      ▼
//! for each row:
//!   OrientationEstimator::update ──→ History::append ──→ MetricEngine::assess
//!      │
//!      ▼
//! FrameReport { samples, impact_level, ... }
//! ```
//!
//! Metric queries read the history on demand. Link events reset everything,
//! including any partially reassembled frame.
//!
//! ## Error Handling
//!
//! Malformed fragments are logged and dropped. The error is still returned so
//! the caller can count or surface it; the pipeline state is left as the
//! decoder documents for that error and processing continues with the next
//! fragment.
//!
//! ## Usage Example
//!
//! ```rust
//! use impactguard_core::{ImpactPipeline, PipelineConfig};
//! use impactguard_core::traits::{FragmentSink, LinkEvent, LinkEventSink};
//!
//! let mut pipeline: ImpactPipeline = ImpactPipeline::new(PipelineConfig::default());
//! pipeline.on_link_event(LinkEvent::Subscribed);
//!
//! // Too short for a 6-axis fragment: rejected, nothing buffered
//! assert!(pipeline.on_fragment(&[0x01, 0x07]).is_err());
//! assert_eq!(pipeline.hic(15), 0.0);
//! ```

use crate::{
    constants::buffers::HISTORY_CAPACITY,
    errors::{FrameError, FrameResult},
    frame::{Decoded, Frame, FrameDecoder, ProtocolConfig, ProtocolVariant},
    fusion::{EstimatorConfig, OrientationEstimator, Quaternion},
    history::History,
    math::Vec3,
    metrics::{ImpactConfig, ImpactLevel, MetricEngine, MetricsReport},
    sample::RawSample,
    time::Timestamp,
    traits::{FragmentSink, LinkEvent, LinkEventSink},
};

/// Configuration for every pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineConfig {
    /// Wire layout
    pub protocol: ProtocolConfig,
    /// Orientation filter and calibration
    pub estimator: EstimatorConfig,
    /// Impact detection and metric parameters
    pub impact: ImpactConfig,
}

impl PipelineConfig {
    /// Defaults for the given sensor firmware
    pub fn for_variant(variant: ProtocolVariant) -> Self {
        Self {
            protocol: ProtocolConfig::for_variant(variant),
            ..Self::default()
        }
    }

    /// Defaults for 9-axis sensors
    pub fn nine_axis() -> Self {
        Self::for_variant(ProtocolVariant::NineAxis)
    }

    /// Override the wire layout
    pub fn with_protocol(mut self, protocol: ProtocolConfig) -> Self {
        self.protocol = protocol;
        self
    }

    /// Override the estimator tuning
    pub fn with_estimator(mut self, estimator: EstimatorConfig) -> Self {
        self.estimator = estimator;
        self
    }

    /// Override the impact parameters
    pub fn with_impact(mut self, impact: ImpactConfig) -> Self {
        self.impact = impact;
        self
    }
}

/// What one fragment contributed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameReport {
    /// Whether the fragment completed a frame
    pub frame_complete: bool,
    /// Bytes buffered toward the current frame (0 once complete)
    pub buffered: usize,
    /// Samples appended to the history
    pub samples: usize,
    /// Rows that did not fit the payload or were not finite
    pub dropped_rows: usize,
    /// Highest impact level among the appended samples
    pub impact_level: ImpactLevel,
    /// Timestamp of the last appended sample
    pub last_timestamp: Option<Timestamp>,
}

impl FrameReport {
    fn pending(buffered: usize) -> Self {
        Self {
            buffered,
            ..Self::default()
        }
    }
}

/// Processing context for one helmet sensor
///
/// `N` is the history capacity in samples.
#[derive(Clone)]
pub struct ImpactPipeline<const N: usize = HISTORY_CAPACITY> {
    config: PipelineConfig,
    decoder: FrameDecoder,
    estimator: OrientationEstimator,
    history: History<N>,
    metrics: MetricEngine,
}

impl<const N: usize> Default for ImpactPipeline<N> {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl<const N: usize> ImpactPipeline<N> {
    /// Empty pipeline
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            decoder: FrameDecoder::new(config.protocol),
            estimator: OrientationEstimator::new(config.estimator),
            history: History::new(),
            metrics: MetricEngine::new(config.impact),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fragment reassembly state
    pub fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }

    /// Orientation and bias estimator
    pub fn estimator(&self) -> &OrientationEstimator {
        &self.estimator
    }

    /// Current attitude
    pub fn orientation(&self) -> Quaternion {
        self.estimator.attitude()
    }

    /// Sample history
    pub fn history(&self) -> &History<N> {
        &self.history
    }

    /// Impact detection and metric engine
    pub fn metrics(&self) -> &MetricEngine {
        &self.metrics
    }

    /// Discard all state: reassembly, calibration, orientation, velocity,
    /// history and impacts
    pub fn reset(&mut self) {
        self.decoder.reset();
        self.estimator.reset();
        self.history.clear();
        self.metrics.reset();
    }

    /// Feed decoded rows through estimation, history and impact assessment
    ///
    /// Rows with a NaN or infinite field are skipped and counted in
    /// [`FrameReport::dropped_rows`].
    pub fn ingest(&mut self, rows: &[RawSample]) -> FrameReport {
        let mut report = FrameReport {
            frame_complete: true,
            ..FrameReport::default()
        };

        for raw in rows {
            // Non-finite rows never reach the estimator
            if !raw.is_finite() {
                log_debug!("row at {} ms is not finite, dropped", raw.timestamp);
                report.dropped_rows += 1;
                continue;
            }
            let sample = self.estimator.update(raw);
            self.history.append(sample);
            let level = self.metrics.assess(&sample, self.estimator.is_calibrated());

            report.samples += 1;
            report.impact_level = report.impact_level.max(level);
            report.last_timestamp = Some(sample.timestamp);
        }
        report
    }

    fn ingest_frame(&mut self, frame: &Frame) -> FrameReport {
        log_debug!(
            "frame ref {} at {} ms: {} rows @ {} Hz",
            frame.reference,
            frame.base_timestamp,
            frame.rows.len(),
            frame.sample_rate_hz
        );
        let mut report = self.ingest(&frame.rows);
        report.dropped_rows += frame.dropped_rows;
        report
    }

    fn reject(&self, err: FrameError) -> FrameError {
        if err.is_stale_fragment() {
            log_debug!("fragment dropped: {}", err);
        } else {
            log_warn!("fragment dropped: {}", err);
        }
        err
    }

    // ===== QUERIES =====

    /// Level of the most recently processed sample
    pub fn impact_level(&self) -> ImpactLevel {
        self.metrics.impact_level()
    }

    /// Head Injury Criterion around the last impact (or latest sample)
    pub fn hic(&self, window_ms: u32) -> f32 {
        self.metrics.hic(&self.history, window_ms)
    }

    /// Brain Injury Criterion with per-axis critical rates (rad/s)
    pub fn bric(&self, cx: f32, cy: f32, cz: f32) -> f32 {
        let critical: Vec3 = [cx, cy, cz];
        self.metrics.bric(&self.history, critical)
    }

    /// Gadd Severity Index over the history
    pub fn gadd_si(&self) -> f32 {
        self.metrics.gadd_si(&self.history)
    }

    /// Rotational Injury Criterion around the last impact (or latest sample)
    pub fn ric(&self, window_ms: u32) -> f32 {
        self.metrics.ric(&self.history, window_ms)
    }

    /// Largest linear acceleration in the history (m/s²)
    pub fn peak_linear_accel(&self) -> f32 {
        self.metrics.peak_linear_accel(&self.history)
    }

    /// Linear acceleration at the last impact (m/s²)
    pub fn accel_on_impact(&self) -> f32 {
        self.metrics.accel_on_impact()
    }

    /// Velocity change before the last impact (m/s)
    pub fn pre_impact_velocity(&self, window_ms: u32) -> f32 {
        self.metrics.pre_impact_velocity(&self.history, window_ms)
    }

    /// Velocity change after the last impact (m/s)
    pub fn post_impact_velocity(&self, window_ms: u32) -> f32 {
        self.metrics.post_impact_velocity(&self.history, window_ms)
    }

    /// Riding speed before the last impact (km/h)
    pub fn riding_speed_kmh(&self) -> f32 {
        self.metrics.riding_speed_kmh(&self.history)
    }

    /// Every metric at its configured defaults
    pub fn report(&self) -> MetricsReport {
        self.metrics.report(&self.history)
    }
}

impl<const N: usize> FragmentSink for ImpactPipeline<N> {
    type Output = FrameReport;

    fn on_fragment(&mut self, fragment: &[u8]) -> FrameResult<FrameReport> {
        match self.decoder.decode(fragment) {
            Ok(Decoded::Pending { buffered }) => Ok(FrameReport::pending(buffered)),
            Ok(Decoded::Frame(frame)) => Ok(self.ingest_frame(&frame)),
            Err(err) => Err(self.reject(err)),
        }
    }
}

impl<const N: usize> LinkEventSink for ImpactPipeline<N> {
    fn on_link_event(&mut self, event: LinkEvent) {
        log_info!("link event {:?}: resetting pipeline", event);
        self.reset();
    }
}
