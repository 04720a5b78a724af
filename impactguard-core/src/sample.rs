//! Motion samples
//!
//! [`RawSample`] is what the frame decoder extracts from one row of a frame.
//! [`Sample`] is the same observation after the estimator has removed bias and
//! gravity and integrated velocity; only `Sample`s are stored in the history.

use crate::{
    constants::STANDARD_GRAVITY,
    math::{self, Vec3},
    time::Timestamp,
};

/// One decoded row, as sent by the sensor
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawSample {
    /// Interpolated row timestamp (ms)
    pub timestamp: Timestamp,
    /// Specific force, sensor frame (m/s²)
    pub accel: Vec3,
    /// Angular rate, sensor frame (rad/s)
    pub gyro: Vec3,
    /// Magnetic field, present only in 9-axis frames
    pub mag: Option<Vec3>,
}

impl RawSample {
    /// 6-axis sample
    pub fn new(timestamp: Timestamp, accel: Vec3, gyro: Vec3) -> Self {
        Self {
            timestamp,
            accel,
            gyro,
            mag: None,
        }
    }

    /// Attach a magnetometer reading
    pub fn with_mag(mut self, mag: Vec3) -> Self {
        self.mag = Some(mag);
        self
    }

    /// Raw accelerometer magnitude (m/s²), gravity included
    pub fn accel_magnitude(&self) -> f32 {
        math::norm(self.accel)
    }

    /// Every field is a finite number
    pub fn is_finite(&self) -> bool {
        math::is_finite(self.accel)
            && math::is_finite(self.gyro)
            && self.mag.map_or(true, math::is_finite)
    }
}

/// Sample augmented by the orientation and bias estimator
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Interpolated row timestamp (ms)
    pub timestamp: Timestamp,
    /// Specific force as received (m/s²)
    pub accel: Vec3,
    /// Angular rate as received (rad/s)
    pub gyro: Vec3,
    /// Magnetic field, 9-axis frames only
    pub mag: Option<Vec3>,
    /// Bias- and gravity-compensated acceleration, sensor frame (m/s²)
    pub linear_accel: Vec3,
    /// Magnitude of `linear_accel` (m/s²)
    pub linear_accel_magnitude: f32,
    /// Integrated velocity (m/s)
    pub velocity: Vec3,
    /// Bias-compensated angular rate (rad/s)
    pub angular_rate: Vec3,
}

impl Sample {
    /// Sample with no derived data yet: linear acceleration, velocity and
    /// angular rate are zero
    pub fn from_raw(raw: &RawSample) -> Self {
        Self {
            timestamp: raw.timestamp,
            accel: raw.accel,
            gyro: raw.gyro,
            mag: raw.mag,
            linear_accel: math::ZERO,
            linear_accel_magnitude: 0.0,
            velocity: math::ZERO,
            angular_rate: raw.gyro,
        }
    }

    /// Linear acceleration in g
    pub fn linear_accel_g(&self) -> f32 {
        self.linear_accel_magnitude / STANDARD_GRAVITY
    }

    /// Speed (m/s)
    pub fn speed(&self) -> f32 {
        math::norm(self.velocity)
    }

    /// Angular speed (rad/s)
    pub fn angular_speed(&self) -> f32 {
        math::norm(self.angular_rate)
    }
}
