//! Impact detection with cooldown
//!
//! Every appended sample is graded by its linear acceleration in g. A graded
//! sample only counts as a new impact when no impact was recorded during the
//! preceding cooldown; the samples that make up one crash otherwise keep
//! re-triggering for tens of milliseconds.

use crate::{
    constants::injury::{
        BRIC_CRITICAL_RATE_RAD_S, BRIC_WINDOW_MS, HIC_WINDOW_MS, IMPACT_COOLDOWN_MS,
        IMPACT_THRESHOLD_HIGH_G, IMPACT_THRESHOLD_LOW_G, IMPACT_THRESHOLD_MEDIUM_G,
        IMPACT_THRESHOLD_SEVERE_G, IMPACT_VELOCITY_WINDOW_MS, RIC_WINDOW_MS,
        RIDING_WINDOW_GAP_MS, RIDING_WINDOW_LEAD_MS, VELOCITY_OFFSET_SAMPLES,
    },
    math::Vec3,
    sample::Sample,
    time::{self, Timestamp},
};

/// Impact severity, 0 (none) to 4 (severe)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ImpactLevel {
    /// Below every threshold, in cooldown, or not calibrated
    #[default]
    None = 0,
    /// Hard knock
    Low = 1,
    /// Moderate impact
    Medium = 2,
    /// Strong impact
    High = 3,
    /// Severe impact
    Severe = 4,
}

impl ImpactLevel {
    /// Numeric level 0-4
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether this level records an impact
    pub fn is_impact(self) -> bool {
        self != Self::None
    }
}

impl From<ImpactLevel> for u8 {
    fn from(level: ImpactLevel) -> Self {
        level.as_u8()
    }
}

/// Grading thresholds in g, ascending
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpactThresholds {
    /// Level 1
    pub low: f32,
    /// Level 2
    pub medium: f32,
    /// Level 3
    pub high: f32,
    /// Level 4
    pub severe: f32,
}

impl Default for ImpactThresholds {
    fn default() -> Self {
        Self {
            low: IMPACT_THRESHOLD_LOW_G,
            medium: IMPACT_THRESHOLD_MEDIUM_G,
            high: IMPACT_THRESHOLD_HIGH_G,
            severe: IMPACT_THRESHOLD_SEVERE_G,
        }
    }
}

impl ImpactThresholds {
    /// Highest level whose threshold `g` reaches
    pub fn grade(&self, g: f32) -> ImpactLevel {
        if !g.is_finite() {
            return ImpactLevel::None;
        }
        if g >= self.severe {
            ImpactLevel::Severe
        } else if g >= self.high {
            ImpactLevel::High
        } else if g >= self.medium {
            ImpactLevel::Medium
        } else if g >= self.low {
            ImpactLevel::Low
        } else {
            ImpactLevel::None
        }
    }

    /// All thresholds multiplied by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            low: self.low * factor,
            medium: self.medium * factor,
            high: self.high * factor,
            severe: self.severe * factor,
        }
    }
}

/// Impact detection and injury metric parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpactConfig {
    /// Grading thresholds (g)
    pub thresholds: ImpactThresholds,
    /// Minimum spacing between reported impacts (ms)
    pub cooldown_ms: u32,
    /// Default HIC window (ms)
    pub hic_window_ms: u32,
    /// BrIC window around the anchor (ms)
    pub bric_window_ms: u32,
    /// BrIC critical angular rates per axis (rad/s)
    pub bric_critical_rates: Vec3,
    /// Default RIC window (ms)
    pub ric_window_ms: u32,
    /// Default pre/post-impact velocity window (ms)
    pub velocity_window_ms: u32,
    /// Samples averaged for the velocity offset
    pub velocity_offset_samples: usize,
    /// Riding speed window start, before the impact (ms)
    pub riding_lead_ms: u32,
    /// Riding speed window end, before the impact (ms)
    pub riding_gap_ms: u32,
}

impl Default for ImpactConfig {
    fn default() -> Self {
        Self {
            thresholds: ImpactThresholds::default(),
            cooldown_ms: IMPACT_COOLDOWN_MS,
            hic_window_ms: HIC_WINDOW_MS,
            bric_window_ms: BRIC_WINDOW_MS,
            bric_critical_rates: [BRIC_CRITICAL_RATE_RAD_S; 3],
            ric_window_ms: RIC_WINDOW_MS,
            velocity_window_ms: IMPACT_VELOCITY_WINDOW_MS,
            velocity_offset_samples: VELOCITY_OFFSET_SAMPLES,
            riding_lead_ms: RIDING_WINDOW_LEAD_MS,
            riding_gap_ms: RIDING_WINDOW_GAP_MS,
        }
    }
}

impl ImpactConfig {
    /// Thresholds at 80 %, for children's helmets and fall testing
    pub fn sensitive() -> Self {
        Self {
            thresholds: ImpactThresholds::default().scaled(0.8),
            ..Self::default()
        }
    }

    /// Override the grading thresholds
    pub fn with_thresholds(mut self, thresholds: ImpactThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Override the cooldown
    pub fn with_cooldown(mut self, cooldown_ms: u32) -> Self {
        self.cooldown_ms = cooldown_ms;
        self
    }

    /// Override the BrIC critical rates
    pub fn with_bric_critical_rates(mut self, rates: Vec3) -> Self {
        self.bric_critical_rates = rates;
        self
    }

    /// Override the default velocity window
    pub fn with_velocity_window(mut self, window_ms: u32) -> Self {
        self.velocity_window_ms = window_ms;
        self
    }
}

/// A recorded impact
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpactEvent {
    /// Timestamp of the triggering sample (ms)
    pub timestamp: Timestamp,
    /// Grade at detection
    pub level: ImpactLevel,
    /// Linear acceleration of the triggering sample (g)
    pub peak_g: f32,
}

/// Impact detection state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ImpactState {
    last_impact: Option<ImpactEvent>,
    level: ImpactLevel,
    impacts: u32,
}

impl ImpactState {
    /// No impact recorded
    pub const fn new() -> Self {
        Self {
            last_impact: None,
            level: ImpactLevel::None,
            impacts: 0,
        }
    }

    /// Grade one sample and record it if it is a new impact
    ///
    /// Returns [`ImpactLevel::None`] before calibration and until strictly
    /// more than `cooldown_ms` has elapsed since the previous impact.
    pub fn assess(&mut self, sample: &Sample, calibrated: bool, config: &ImpactConfig) -> ImpactLevel {
        self.level = self.grade(sample, calibrated, config);
        if self.level.is_impact() {
            self.last_impact = Some(ImpactEvent {
                timestamp: sample.timestamp,
                level: self.level,
                peak_g: sample.linear_accel_g(),
            });
            self.impacts = self.impacts.saturating_add(1);
            log_info!(
                "impact level {} at {} ms ({} g)",
                self.level.as_u8(),
                sample.timestamp,
                sample.linear_accel_g()
            );
        }
        self.level
    }

    fn grade(&self, sample: &Sample, calibrated: bool, config: &ImpactConfig) -> ImpactLevel {
        if !calibrated {
            return ImpactLevel::None;
        }

        let level = config.thresholds.grade(sample.linear_accel_g());
        if !level.is_impact() {
            return ImpactLevel::None;
        }

        match self.last_impact {
            Some(last) if time::elapsed_ms(last.timestamp, sample.timestamp) <= config.cooldown_ms => {
                log_debug!("impact at {} ms suppressed by cooldown", sample.timestamp);
                ImpactLevel::None
            }
            _ => level,
        }
    }

    /// Level of the most recently assessed sample
    pub fn level(&self) -> ImpactLevel {
        self.level
    }

    /// Most recent recorded impact
    pub fn last_impact(&self) -> Option<&ImpactEvent> {
        self.last_impact.as_ref()
    }

    /// Whether any impact has been recorded since the last reset
    pub fn detected(&self) -> bool {
        self.last_impact.is_some()
    }

    /// Impacts recorded since the last reset
    pub fn impact_count(&self) -> u32 {
        self.impacts
    }

    /// Forget every impact
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
