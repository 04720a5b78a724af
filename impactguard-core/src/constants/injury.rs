//! Impact Detection and Injury Criteria Parameters
//!
//! Thresholds are expressed in g of linear (gravity-compensated)
//! acceleration. They are defaults for [`crate::metrics::ImpactConfig`], not
//! protocol constants.

// ===== IMPACT LEVELS =====

/// Level 1 threshold (g). Hard knock, no injury expected.
pub const IMPACT_THRESHOLD_LOW_G: f32 = 2.5;

/// Level 2 threshold (g).
pub const IMPACT_THRESHOLD_MEDIUM_G: f32 = 5.0;

/// Level 3 threshold (g).
pub const IMPACT_THRESHOLD_HIGH_G: f32 = 7.5;

/// Level 4 threshold (g). Severe impact.
pub const IMPACT_THRESHOLD_SEVERE_G: f32 = 10.0;

/// Minimum time between two reported impacts (ms).
///
/// Samples of the same event keep exceeding the threshold for tens of
/// milliseconds; without a cooldown one crash would register many times.
pub const IMPACT_COOLDOWN_MS: u32 = 2000;

// ===== HEAD INJURY CRITERION =====

/// HIC window (ms). HIC15 is the regulatory variant for head impacts.
///
/// Source: FMVSS 208
pub const HIC_WINDOW_MS: u32 = 15;

/// Exponent of the average acceleration in HIC, RIC and Gadd SI.
pub const SEVERITY_EXPONENT: f32 = 2.5;

// ===== BRAIN INJURY CRITERION =====

/// BrIC window (ms) around the impact.
pub const BRIC_WINDOW_MS: u32 = 15;

/// Critical angular velocity for BrIC, same on all three axes (rad/s).
///
/// Source: Takhounts et al., 2013 (NHTSA)
pub const BRIC_CRITICAL_RATE_RAD_S: f32 = 66.3;

// ===== RIC =====

/// RIC window (ms).
pub const RIC_WINDOW_MS: u32 = 15;

// ===== VELOCITY =====

/// Window before or after the impact used for head velocity (ms).
pub const IMPACT_VELOCITY_WINDOW_MS: u32 = 100;

/// Samples averaged at the start of a velocity window to estimate the
/// acceleration offset removed before integration.
pub const VELOCITY_OFFSET_SAMPLES: usize = 5;

/// Riding speed window starts this long before the impact (ms).
pub const RIDING_WINDOW_LEAD_MS: u32 = 5000;

/// Riding speed window ends this long before the impact (ms).
///
/// Excludes the last second where the rider may already be braking or
/// falling.
pub const RIDING_WINDOW_GAP_MS: u32 = 1000;
