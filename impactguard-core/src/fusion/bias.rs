//! Stationary bias calibration
//!
//! The first `N` samples after a reset are assumed to be taken with the helmet
//! at rest and level. Their means become the accelerometer and gyroscope bias,
//! with one standard gravity removed from the accelerometer Z axis. Once
//! calibrated the bias is frozen until the next reset.

use crate::{
    constants::{fusion::BIAS_CALIBRATION_SAMPLES, STANDARD_GRAVITY},
    math::{self, Vec3},
};

/// Bias calibration state
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BiasState {
    accel_sum: Vec3,
    gyro_sum: Vec3,
    count: u32,
    target: u32,
    accel_bias: Vec3,
    gyro_bias: Vec3,
    calibrated: bool,
}

impl Default for BiasState {
    fn default() -> Self {
        Self::new(BIAS_CALIBRATION_SAMPLES)
    }
}

impl BiasState {
    /// Calibrate over `target` samples (at least one)
    pub fn new(target: u32) -> Self {
        Self {
            accel_sum: math::ZERO,
            gyro_sum: math::ZERO,
            count: 0,
            target: target.max(1),
            accel_bias: math::ZERO,
            gyro_bias: math::ZERO,
            calibrated: false,
        }
    }

    /// Accumulate one raw reading
    ///
    /// Returns `true` on the sample that completes calibration. Ignored once
    /// calibrated.
    pub fn observe(&mut self, accel: Vec3, gyro: Vec3) -> bool {
        if self.calibrated {
            return false;
        }

        self.accel_sum = math::add(self.accel_sum, accel);
        self.gyro_sum = math::add(self.gyro_sum, gyro);
        self.count += 1;

        if self.count < self.target {
            return false;
        }

        let inv = 1.0 / self.count as f32;
        let mut accel_bias = math::scale(self.accel_sum, inv);
        accel_bias[2] -= STANDARD_GRAVITY;
        self.accel_bias = accel_bias;
        self.gyro_bias = math::scale(self.gyro_sum, inv);
        self.calibrated = true;

        log_debug!(
            "bias calibrated over {} samples: accel={:?} gyro={:?}",
            self.count,
            self.accel_bias,
            self.gyro_bias
        );
        true
    }

    /// Whether the bias is frozen
    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    /// Samples accumulated so far
    pub fn samples_seen(&self) -> u32 {
        self.count
    }

    /// Samples required to calibrate
    pub fn target(&self) -> u32 {
        self.target
    }

    /// Accelerometer bias (zero until calibrated)
    pub fn accel_bias(&self) -> Vec3 {
        self.accel_bias
    }

    /// Gyroscope bias (zero until calibrated)
    pub fn gyro_bias(&self) -> Vec3 {
        self.gyro_bias
    }

    /// Start over
    pub fn reset(&mut self) {
        *self = Self::new(self.target);
    }
}
