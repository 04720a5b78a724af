//! Injury Metric Engine
//!
//! ## Overview
//!
//! The engine grades every new sample for impact severity and answers injury
//! metric queries over the sample history. Queries are computed on demand;
//! nothing is cached between calls, so results always reflect the current
//! history contents.
//!
//! ## Anchoring
//!
//! Short-window metrics (HIC, RIC, BrIC) are centred on the most recent
//! impact, or on the latest sample when no impact has been recorded. Velocity
//! metrics are only defined relative to an impact and return `0.0` without
//! one.
//!
//! ```text
//!                          last impact
//!   ─────[━━━ riding ━━━]──────[pre]│[post]───────→ t
//!       -5 s          -1 s   -100 ms   +100 ms
//!                              [HIC/RIC/BrIC ±15 ms]
//! ```
//!
//! ## Missing Data
//!
//! Every query returns `0.0` when the history cannot support it: empty,
//! too few samples in the window, or no impact to anchor to.

pub mod criteria;
pub mod impact;
pub mod velocity;

pub use impact::{ImpactConfig, ImpactEvent, ImpactLevel, ImpactState, ImpactThresholds};

use crate::{
    constants::{MPS_TO_KMH, STANDARD_GRAVITY},
    history::{History, WindowSpan},
    math::Vec3,
    sample::Sample,
    time::Timestamp,
};

/// Impact detection plus metric queries
#[derive(Debug, Clone, Default)]
pub struct MetricEngine {
    config: ImpactConfig,
    state: ImpactState,
}

impl MetricEngine {
    /// Engine with no impact recorded
    pub fn new(config: ImpactConfig) -> Self {
        Self {
            config,
            state: ImpactState::new(),
        }
    }

    /// Active parameters
    pub fn config(&self) -> &ImpactConfig {
        &self.config
    }

    /// Detection state
    pub fn state(&self) -> &ImpactState {
        &self.state
    }

    /// Grade a freshly appended sample
    pub fn assess(&mut self, sample: &Sample, calibrated: bool) -> ImpactLevel {
        self.state.assess(sample, calibrated, &self.config)
    }

    /// Level of the most recently assessed sample
    pub fn impact_level(&self) -> ImpactLevel {
        self.state.level()
    }

    /// Forget every impact
    pub fn reset(&mut self) {
        self.state.reset();
    }

    fn impact_time(&self) -> Option<Timestamp> {
        self.state.last_impact().map(|event| event.timestamp)
    }

    fn anchor<const N: usize>(&self, history: &History<N>) -> Option<Timestamp> {
        self.impact_time()
            .or_else(|| history.latest().map(|s| s.timestamp))
    }

    /// HIC over intervals up to `window_ms`, around the anchor
    pub fn hic<const N: usize>(&self, history: &History<N>, window_ms: u32) -> f32 {
        let Some(anchor) = self.anchor(history) else {
            return 0.0;
        };
        criteria::hic(&history.window(anchor, window_ms, WindowSpan::Around), window_ms)
    }

    /// BrIC around the anchor with the given critical rates (rad/s)
    pub fn bric<const N: usize>(&self, history: &History<N>, critical: Vec3) -> f32 {
        let Some(anchor) = self.anchor(history) else {
            return 0.0;
        };
        let window = history.window(anchor, self.config.bric_window_ms, WindowSpan::Around);
        criteria::bric(&window, critical)
    }

    /// Gadd Severity Index over the whole history
    pub fn gadd_si<const N: usize>(&self, history: &History<N>) -> f32 {
        criteria::gadd_si(&history.all())
    }

    /// RIC over intervals up to `window_ms`, around the anchor
    pub fn ric<const N: usize>(&self, history: &History<N>, window_ms: u32) -> f32 {
        let Some(anchor) = self.anchor(history) else {
            return 0.0;
        };
        criteria::ric(&history.window(anchor, window_ms, WindowSpan::Around), window_ms)
    }

    /// Largest linear acceleration in the history (m/s²)
    pub fn peak_linear_accel<const N: usize>(&self, history: &History<N>) -> f32 {
        criteria::peak_linear_accel(&history.all())
    }

    /// Linear acceleration of the sample that triggered the last impact (m/s²)
    pub fn accel_on_impact(&self) -> f32 {
        self.state
            .last_impact()
            .map_or(0.0, |event| event.peak_g * STANDARD_GRAVITY)
    }

    /// Velocity change (m/s) over `window_ms` before the last impact
    pub fn pre_impact_velocity<const N: usize>(&self, history: &History<N>, window_ms: u32) -> f32 {
        self.impact_velocity(history, window_ms, WindowSpan::Before)
    }

    /// Velocity change (m/s) over `window_ms` after the last impact
    pub fn post_impact_velocity<const N: usize>(&self, history: &History<N>, window_ms: u32) -> f32 {
        self.impact_velocity(history, window_ms, WindowSpan::After)
    }

    fn impact_velocity<const N: usize>(&self, history: &History<N>, window_ms: u32, span: WindowSpan) -> f32 {
        let Some(impact) = self.impact_time() else {
            return 0.0;
        };
        let window = history.window(impact, window_ms, span);
        velocity::window_velocity(&window, self.config.velocity_offset_samples)
    }

    /// Speed (km/h) accumulated in the riding window before the last impact
    pub fn riding_speed_kmh<const N: usize>(&self, history: &History<N>) -> f32 {
        let Some(impact) = self.impact_time() else {
            return 0.0;
        };
        let start = impact.saturating_sub(self.config.riding_lead_ms);
        let end = impact.saturating_sub(self.config.riding_gap_ms);
        if end <= start {
            return 0.0;
        }
        let window = history.between(start, end);
        velocity::window_velocity(&window, self.config.velocity_offset_samples) * MPS_TO_KMH
    }

    /// Every metric at its configured default parameters
    pub fn report<const N: usize>(&self, history: &History<N>) -> MetricsReport {
        MetricsReport {
            impact_level: self.impact_level(),
            impact_count: self.state.impact_count(),
            last_impact: self.impact_time(),
            hic: self.hic(history, self.config.hic_window_ms),
            bric: self.bric(history, self.config.bric_critical_rates),
            gadd_si: self.gadd_si(history),
            ric: self.ric(history, self.config.ric_window_ms),
            peak_linear_accel: self.peak_linear_accel(history),
            accel_on_impact: self.accel_on_impact(),
            pre_impact_velocity: self.pre_impact_velocity(history, self.config.velocity_window_ms),
            post_impact_velocity: self.post_impact_velocity(history, self.config.velocity_window_ms),
            riding_speed_kmh: self.riding_speed_kmh(history),
        }
    }
}

/// Snapshot of every metric
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricsReport {
    /// Level of the latest sample
    pub impact_level: ImpactLevel,
    /// Impacts since the last reset
    pub impact_count: u32,
    /// Timestamp of the last impact
    pub last_impact: Option<Timestamp>,
    /// HIC around the anchor
    pub hic: f32,
    /// BrIC around the anchor
    pub bric: f32,
    /// Gadd SI over the history
    pub gadd_si: f32,
    /// RIC around the anchor
    pub ric: f32,
    /// Peak linear acceleration (m/s²)
    pub peak_linear_accel: f32,
    /// Linear acceleration at the last impact (m/s²)
    pub accel_on_impact: f32,
    /// Velocity change before the last impact (m/s)
    pub pre_impact_velocity: f32,
    /// Velocity change after the last impact (m/s)
    pub post_impact_velocity: f32,
    /// Riding speed before the last impact (km/h)
    pub riding_speed_kmh: f32,
}
