//! Physical Constants
//!
//! Gravity and unit conversions shared by the estimator and the metric engine.

/// Standard gravity (m/s²).
///
/// Used both as the nominal gravity vector magnitude for compensation and as
/// the divisor converting linear acceleration into g.
///
/// The sensor firmware and the injury criteria literature round to 9.81;
/// the exact CGPM value is 9.80665.
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Metres per second to kilometres per hour.
pub const MPS_TO_KMH: f32 = 3.6;

/// Milliseconds per second.
pub const MS_PER_SECOND: f32 = 1000.0;
